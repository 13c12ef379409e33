/// Greedy line wrapping for point-of-interest panels.
///
/// Once a line holds `soft` characters it breaks at the next space. A word
/// that runs the line to `hard` characters is cut with a trailing `-`.
/// Explicit newlines always break. Lines never start with a space.
pub fn wrap_text(text: &str, soft: usize, hard: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut count = 0usize;

    for ch in text.chars() {
        if ch == '\n' {
            lines.push(std::mem::take(&mut line));
            count = 0;
            continue;
        }
        if ch == ' ' && count == 0 {
            continue;
        }
        if ch == ' ' && count >= soft {
            lines.push(std::mem::take(&mut line));
            count = 0;
            continue;
        }

        line.push(ch);
        count += 1;

        if count >= hard {
            line.push('-');
            lines.push(std::mem::take(&mut line));
            count = 0;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
