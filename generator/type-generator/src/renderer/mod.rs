//! Building blocks of the generated declaration file.

mod declarations;

pub use declarations::*;

/// Top level declarations in output order, separated by an empty line.
#[derive(Debug, Default)]
pub(crate) struct RenderContext {
    output_queue: Vec<String>,
}

impl RenderContext {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_output(&mut self, output: impl ToString) {
        let output = output.to_string();

        if !output.is_empty() {
            self.output_queue.push(output);
        }
    }

    pub(crate) fn format(self) -> String {
        let mut formatted = self.output_queue.join("\n\n");
        formatted.push('\n');
        formatted
    }
}

/// Uppercases the first character, leaving the rest as is.
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_only_touches_the_first_character() {
        assert_eq!(capitalize("findManyUser"), "FindManyUser");
        assert_eq!(capitalize("AND"), "AND");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn empty_outputs_are_skipped() {
        let mut ctx = RenderContext::new();
        ctx.add_output("a");
        ctx.add_output("");
        ctx.add_output("b");

        assert_eq!(ctx.format(), "a\n\nb\n");
    }
}
