/// The opening line that has to directly follow a block declaration.
const OPEN_LINE: &str = "{";

/// Extracts a single top-level block from a gamestate dump.
///
/// The block is identified by a `<block_name>=` line immediately followed by
/// a line consisting only of `{`. From there the brace depth is tracked line
/// by line: a line containing `{` opens a level and a line containing `}`
/// closes one, a line containing both does both. The scan stops once the
/// depth returns to zero.
///
/// # Returns
///
/// The trimmed lines of the block, declaration and closing line included,
/// each terminated by a newline. [None] if the declaration never occurs or
/// the block is never closed, a truncated block is never returned.
///
/// Braces within quoted strings are not accounted for, the format doesn't
/// produce them in the sections we care about.
pub fn extract_block<I, S>(lines: I, block_name: &str) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lines = lines.into_iter().peekable();
    let mut depth: usize = 0;
    let mut content = String::new();
    while let Some(line) = lines.next() {
        let line = line.as_ref().trim();
        if depth == 0 {
            if is_declaration(line, block_name)
                && lines
                    .peek()
                    .is_some_and(|next| next.as_ref().trim() == OPEN_LINE)
            {
                lines.next();
                content.push_str(line);
                content.push('\n');
                content.push_str(OPEN_LINE);
                content.push('\n');
                depth = 1;
            }
            continue;
        }
        if line.contains('{') {
            depth += 1;
        }
        if line.contains('}') {
            depth -= 1;
        }
        content.push_str(line);
        content.push('\n');
        if depth == 0 {
            return Some(content);
        }
    }
    if depth != 0 {
        log::warn!("block {} is not terminated", block_name);
    }
    None
}

/// Checks whether the trimmed line is exactly `<block_name>=`
fn is_declaration(line: &str, block_name: &str) -> bool {
    line.strip_suffix('=')
        .is_some_and(|name| name == block_name)
}
