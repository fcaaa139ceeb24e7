use crate::vocabulary::Placeholder;

/// Markers that open a conventional stack-trace suffix: a newline followed
/// by an indented `at ` frame (four spaces as printed by V8, a tab as
/// printed by the JVM).
pub const STACK_MARKERS: &[&str] = &["\n    at ", "\n\tat "];

/// Cuts `message` at the first stack-trace marker and appends
/// ` {StackFrames}`. Returns `None` when no marker is present.
pub fn truncate_stack(message: &str) -> Option<String> {
    let start = STACK_MARKERS
        .iter()
        .filter_map(|marker| message.find(marker))
        .min()?;
    let mut out = String::with_capacity(start + 14);
    out.push_str(&message[..start]);
    out.push(' ');
    out.push_str(Placeholder::StackFrames.as_str());
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_at_first_frame() {
        let msg = "TypeError: x is undefined\n    at f (a.js:1:2)\n    at g (b.js:3:4)";
        assert_eq!(
            truncate_stack(msg).as_deref(),
            Some("TypeError: x is undefined {StackFrames}")
        );
    }

    #[test]
    fn tab_indented_frames() {
        let msg = "java.lang.IllegalStateException: boom\n\tat com.acme.Main.run(Main.java:12)";
        assert_eq!(
            truncate_stack(msg).as_deref(),
            Some("java.lang.IllegalStateException: boom {StackFrames}")
        );
    }

    #[test]
    fn earliest_marker_wins() {
        let msg = "boom\n\tat a\n    at b";
        assert_eq!(truncate_stack(msg).as_deref(), Some("boom {StackFrames}"));
    }

    #[test]
    fn absent_marker() {
        assert_eq!(truncate_stack("no frames here\nsecond line"), None);
        assert_eq!(truncate_stack("  at start without newline"), None);
    }
}
