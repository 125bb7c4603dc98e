/// Fills `{name}` placeholders in a message template.
///
/// The template is scanned once, left to right. Values are inserted
/// verbatim, so a value that itself contains `{...}` is never expanded.
/// Placeholders without a value stay in the output unchanged.
pub struct MessageBuilder {
    template: &'static str,
    vars: Vec<(&'static str, String)>,
}

impl MessageBuilder {
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            vars: Vec::new(),
        }
    }

    /// Set a placeholder value. Setting the same key again replaces it.
    pub fn var(mut self, key: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.vars.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.vars.push((key, value)),
        }
        self
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn build(self) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                return out;
            };

            let key = &after[..close];
            match self.lookup(key) {
                Some(value) => out.push_str(value),
                None => out.push_str(&rest[open..open + close + 2]),
            }
            rest = &after[close + 1..];
        }

        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_substitutes_every_occurrence() {
        let text = MessageBuilder::new("{a} and {a} then {b}")
            .var("a", "x")
            .var("b", String::from("y"))
            .build();
        assert_eq!(text, "x and x then y");
    }

    #[test]
    fn test_unknown_placeholders_are_left_alone() {
        let text = MessageBuilder::new("deleting {path}").build();
        assert_eq!(text, "deleting {path}");
    }

    #[test]
    fn test_values_are_inserted_verbatim() {
        for _ in 0..50 {
            let text = MessageBuilder::new("moving from {from} to {to}")
                .var("from", "{to}/.vimrc")
                .var("to", "/home/developer")
                .build();
            assert_eq!(text, "moving from {to}/.vimrc to /home/developer");
        }
    }

    #[test]
    fn test_later_value_replaces_earlier() {
        let text = MessageBuilder::new("bash {script}")
            .var("script", "a.sh")
            .var("script", "b.sh")
            .build();
        assert_eq!(text, "bash b.sh");
    }

    #[test]
    fn test_unclosed_brace_is_copied() {
        let text = MessageBuilder::new("run {cmd} {oops")
            .var("cmd", "ls")
            .build();
        assert_eq!(text, "run ls {oops");
    }
}
