use compact_str::CompactString;

use termcolor::{Color, ColorSpec};

/// Ordered list of segments written for every record of one level.
#[derive(Default, Clone, Debug)]
pub struct LogFmt {
    segments: Vec<SegmentSpec>,
}

impl LogFmt {

    pub fn build(f: impl FnOnce(&mut LogFmtBuilder)) -> Self {
        let mut fmt = Self::default();
        f(&mut LogFmtBuilder::new(&mut fmt));
        fmt
    }

    /// `LEVEL target: message`, with the level label in bold `color`.
    pub(crate) fn labeled(color: Color) -> Self {
        Self::build(|builder| {
            builder
                .level(|spec| spec.with_color_spec(|color_spec| {
                    color_spec.set_fg(Some(color)).set_bold(true);
                }))
                .text(" ", |spec| spec)
                .target(|spec| spec.with_color_spec(|color_spec| {
                    color_spec.set_dimmed(true);
                }))
                .text(": ", |spec| spec)
                .message(|spec| spec);
        })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn clear(&mut self) {
        self.segments.clear();
    }
}

impl<'a> IntoIterator for &'a LogFmt {

    type Item = &'a SegmentSpec;
    type IntoIter = core::slice::Iter<'a, SegmentSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[derive(Default, Clone, Debug)]
pub struct LogSpec {
    pub color_spec: Option<ColorSpec>,
}

impl LogSpec {

    #[inline(always)]
    pub fn with_color_spec(mut self, mut f: impl FnMut(&mut ColorSpec)) -> Self {
        let color_spec = self.color_spec.insert(ColorSpec::new());
        f(color_spec);
        self
    }
}

#[derive(Clone, Debug)]
pub enum SegmentSpec {
    Message(LogSpec),
    Text(CompactString, LogSpec),
    Target(LogSpec),
    Level(LogSpec),
}

pub struct LogFmtBuilder<'a> {
    fmt: &'a mut LogFmt,
}

impl<'a> LogFmtBuilder<'a> {

    /// Starts a new format in place of `fmt`, dropping its previous segments.
    #[inline(always)]
    pub fn new(fmt: &'a mut LogFmt) -> Self {
        fmt.clear();
        Self {
            fmt,
        }
    }

    #[inline(always)]
    pub fn message(&mut self, f: impl FnOnce(LogSpec) -> LogSpec) -> &mut Self {
        self.fmt.segments.push(SegmentSpec::Message(f(Default::default())));
        self
    }

    #[inline(always)]
    pub fn text(&mut self, text: &str, f: impl FnOnce(LogSpec) -> LogSpec) -> &mut Self {
        self.fmt.segments.push(SegmentSpec::Text(CompactString::new(text), f(Default::default())));
        self
    }

    #[inline(always)]
    pub fn target(&mut self, f: impl FnOnce(LogSpec) -> LogSpec) -> &mut Self {
        self.fmt.segments.push(SegmentSpec::Target(f(Default::default())));
        self
    }

    #[inline(always)]
    pub fn level(&mut self, f: impl FnOnce(LogSpec) -> LogSpec) -> &mut Self {
        self.fmt.segments.push(SegmentSpec::Level(f(Default::default())));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_replaces_segments() {
        let mut fmt = LogFmt::labeled(Color::Red);
        assert_eq!(fmt.len(), 5);

        LogFmtBuilder::new(&mut fmt).message(|spec| spec);
        assert_eq!(fmt.len(), 1);
        assert!(matches!(fmt.into_iter().next(), Some(SegmentSpec::Message(_))));
    }

    #[test]
    fn color_spec_is_only_set_on_request() {
        let fmt = LogFmt::build(|builder| {
            builder
                .text("plain", |spec| spec)
                .text("red", |spec| spec.with_color_spec(|color_spec| {
                    color_spec.set_fg(Some(Color::Red));
                }));
        });
        let specs: Vec<_> = fmt
            .into_iter()
            .map(|segment| match segment {
                SegmentSpec::Text(_, spec) => spec.color_spec.clone(),
                _ => unreachable!(),
            })
            .collect();
        assert!(specs[0].is_none());
        assert_eq!(specs[1].as_ref().and_then(|spec| spec.fg()), Some(&Color::Red));
    }
}
