use super::MenuVocabulary;

/// Lines of the menu section window, in page order.
///
/// A line with a stop marker closes the window and is dropped; otherwise a
/// line with a start marker opens it and is kept. Stop wins when a line
/// carries both. Blank lines never make it out.
pub fn menu_section<'a, I>(lines: I, vocabulary: &MenuVocabulary) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut in_section = false;
    let mut section = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if vocabulary.is_stop(line) {
            in_section = false;
            continue;
        }
        if vocabulary.is_start(line) {
            in_section = true;
        }
        if in_section {
            section.push(line);
        }
    }

    section
}
