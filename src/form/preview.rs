/// Render an argument list as a single line of text.
///
/// Tokens are joined by single spaces. A token that contains whitespace, or is
/// empty, is wrapped in double quotes so that it stays visible as one token.
pub fn render_preview(arguments: &[String]) -> String {
    arguments
        .iter()
        .map(|arg| {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                format!("\"{arg}\"")
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
