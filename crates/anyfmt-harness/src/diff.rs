//! Diff rendering for fixture comparison.

/// Render a text diff between expected and actual output.
///
/// Rendered output is usually one line, so a line that exists on only one
/// side is still reported.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::from("[identical]");
    }

    let mut out = String::new();
    out.push_str("--- expected\n");
    out.push_str("+++ actual\n");
    let expected_lines: Vec<&str> = expected.split('\n').collect();
    let actual_lines: Vec<&str> = actual.split('\n').collect();
    for i in 0..expected_lines.len().max(actual_lines.len()) {
        let e = expected_lines.get(i);
        let a = actual_lines.get(i);
        if e != a {
            out.push_str(&format!("@@ line {} @@\n", i + 1));
            if let Some(e) = e {
                out.push_str(&format!("-{e:?}\n"));
            }
            if let Some(a) = a {
                out.push_str(&format!("+{a:?}\n"));
            }
        }
    }
    out
}
