//! Row rendering and the boundary that keeps one bad row from blanking the
//! list.
//!
//! Every row of a window goes through a [`RowRenderer`]. [`render_rows`]
//! calls it once per item and silently drops rows whose renderer fails; the
//! failure is logged at `warn` and the remaining rows still render.

use ratatui::style::Style;
use ratatui::text::Line;

use crate::runeutil;

/// Why a row could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    /// The renderer rejected the item.
    #[error("row {index} rejected: {reason}")]
    Rejected { index: usize, reason: String },
    /// There is no room to draw anything.
    #[error("row {index} does not fit in {width} columns")]
    NoSpace { index: usize, width: u16 },
}

/// Renders one item of the window as a single terminal line.
///
/// `index` is the item's position in the filtered sequence, which is also
/// its only identity: duplicate words are indistinguishable.
pub trait RowRenderer: Send {
    fn render<'a>(&self, item: &'a str, index: usize, width: u16) -> Result<Line<'a>, RowError>;
}

/// Any `Fn(&str, usize, u16) -> Result<Line, RowError>` closure is a renderer.
impl<F> RowRenderer for F
where
    F: for<'a> Fn(&'a str, usize, u16) -> Result<Line<'a>, RowError> + Send,
{
    fn render<'a>(&self, item: &'a str, index: usize, width: u16) -> Result<Line<'a>, RowError> {
        self(item, index, width)
    }
}

/// Default renderer: strips control characters and truncates to the row
/// width with an ellipsis.
#[derive(Debug, Clone, Default)]
pub struct PlainRow {
    pub style: Style,
}

impl RowRenderer for PlainRow {
    fn render<'a>(&self, item: &'a str, index: usize, width: u16) -> Result<Line<'a>, RowError> {
        if width == 0 {
            return Err(RowError::NoSpace { index, width });
        }
        let clean = runeutil::sanitize(item);
        let fitted = runeutil::truncate(&clean, usize::from(width), "…");
        Ok(Line::styled(fitted, self.style))
    }
}

/// Render `items` (the window, whose first element sits at filtered index
/// `first_index`), skipping rows whose renderer fails.
pub fn render_rows<'a>(
    renderer: &dyn RowRenderer,
    items: &[&'a str],
    first_index: usize,
    width: u16,
) -> Vec<Line<'a>> {
    let mut lines = Vec::with_capacity(items.len());
    for (offset, &item) in items.iter().enumerate() {
        let index = first_index + offset;
        match renderer.render(item, index, width) {
            Ok(line) => lines.push(line),
            Err(err) => tracing::warn!(%err, index, "row omitted"),
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::Subscriber;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn reject_bad<'a>(item: &'a str, index: usize, _width: u16) -> Result<Line<'a>, RowError> {
        if item.starts_with("bad") {
            Err(RowError::Rejected {
                index,
                reason: "bad word".into(),
            })
        } else {
            Ok(Line::raw(item))
        }
    }

    #[test]
    fn plain_row_truncates_and_sanitizes() {
        let row = PlainRow::default();
        let line = row.render("straw\u{7}berry", 0, 6).unwrap();
        assert_eq!(text(&line), "straw…");
    }

    #[test]
    fn plain_row_needs_space() {
        let err = PlainRow::default().render("fig", 3, 0).unwrap_err();
        assert_eq!(err, RowError::NoSpace { index: 3, width: 0 });
    }

    #[test]
    fn failing_rows_are_omitted_not_fatal() {
        let items = ["apple", "bad-one", "grape", "bad-two"];
        let lines = render_rows(&reject_bad, &items, 10, 20);
        let rendered: Vec<String> = lines.iter().map(text).collect();
        assert_eq!(rendered, vec!["apple", "grape"]);
    }

    #[test]
    fn empty_window_renders_nothing() {
        assert!(render_rows(&PlainRow::default(), &[], 0, 20).is_empty());
    }

    #[derive(Default)]
    struct WarnCapture {
        indices: Arc<Mutex<Vec<u64>>>,
    }

    struct IndexVisitor(Option<u64>);

    impl Visit for IndexVisitor {
        fn record_u64(&mut self, field: &Field, value: u64) {
            if field.name() == "index" {
                self.0 = Some(value);
            }
        }

        fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}
    }

    impl<S: Subscriber> Layer<S> for WarnCapture {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() != tracing::Level::WARN {
                return;
            }
            let mut visitor = IndexVisitor(None);
            event.record(&mut visitor);
            if let Some(index) = visitor.0 {
                self.indices.lock().unwrap().push(index);
            }
        }
    }

    #[test]
    fn omitted_rows_are_logged_with_filtered_index() {
        let capture = WarnCapture::default();
        let indices = capture.indices.clone();
        let subscriber = tracing_subscriber::registry().with(capture);

        tracing::subscriber::with_default(subscriber, || {
            render_rows(&reject_bad, &["bad", "ok", "bad"], 100, 20);
        });

        assert_eq!(*indices.lock().unwrap(), vec![100, 102]);
    }
}
