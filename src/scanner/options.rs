/// Switches that change how the scanner treats comments and the first line.
///
/// The defaults give plain Lox behavior: the first `*/` closes a block
/// comment, and a leading `#!` line is scanned like any other text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Track `/*` inside block comments so `/* a /* b */ c */` is one comment.
    pub nested_comments: bool,
    /// Drop a `#!` interpreter line at the very start of the source.
    pub skip_shebang: bool,
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nested_comments(mut self, enabled: bool) -> Self {
        self.nested_comments = enabled;
        self
    }

    pub fn skip_shebang(mut self, enabled: bool) -> Self {
        self.skip_shebang = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_off() {
        let options = ScanOptions::default();
        assert!(!options.nested_comments);
        assert!(!options.skip_shebang);
    }

    #[test]
    fn builder_sets_flags() {
        let options = ScanOptions::new().nested_comments(true).skip_shebang(true);
        assert_eq!(
            options,
            ScanOptions {
                nested_comments: true,
                skip_shebang: true,
            }
        );
    }
}
