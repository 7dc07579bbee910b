//! Shared test constants and helpers for integration tests.

#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

/// An article in the shape the generation pipeline produces: prose with
/// numeric citations followed by a references list.
pub const SAMPLE_ARTICLE: &str = "\
# Photosynthesis

Plants convert light into chemical energy [1]. The process takes place in
chloroplasts [2], [3].

## Stages

1. Light-dependent reactions
2. The Calvin cycle

> Oxygen is a by-product [1].

## References
- [Britannica](https://www.britannica.com/science/photosynthesis)
- [Khan Academy](https://www.khanacademy.org/science/biology/photosynthesis)
";

/// Creates a temporary file holding `content`, with the given extension.
pub fn create_temp_file(content: &str, extension: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(extension)
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Counts how many elements carry `class` as one of their classes.
pub fn count_class(html: &str, class: &str) -> usize {
    html.split("class=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .filter(|value| value.split(' ').any(|c| c == class))
        .count()
}
