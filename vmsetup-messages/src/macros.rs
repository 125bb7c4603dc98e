/// Render a template from [`MESSAGES`](crate::MESSAGES) with named values.
///
/// ```
/// use vmsetup_messages::{msg, MESSAGES};
///
/// assert_eq!(msg!(MESSAGES.bash_banner, script = "run.sh"), "bash run.sh");
/// ```
#[macro_export]
macro_rules! msg {
    ($template:expr $(,)?) => {
        $crate::builder::MessageBuilder::new($template).build()
    };
    ($template:expr, $($key:ident = $value:expr),+ $(,)?) => {
        $crate::builder::MessageBuilder::new($template)
            $(.var(stringify!($key), $value))+
            .build()
    };
}

#[cfg(test)]
mod tests {
    use crate::messages::MESSAGES;

    #[test]
    fn test_msg_fills_named_placeholders() {
        let text = msg!(
            MESSAGES.clone_to_banner,
            repo = "ycm-core/YouCompleteMe",
            destination = "/tmp/ycm",
        );
        assert_eq!(text, "cloning repo ycm-core/YouCompleteMe to /tmp/ycm");
    }

    #[test]
    fn test_move_banner_keeps_braces_in_paths() {
        let text = msg!(
            MESSAGES.move_banner,
            from = "{to}/.vimrc",
            to = "/home/developer"
        );
        assert_eq!(text, "moving from {to}/.vimrc to /home/developer");
    }

    #[test]
    fn test_msg_without_vars() {
        assert_eq!(msg!(MESSAGES.provision_complete), MESSAGES.provision_complete);
    }
}
