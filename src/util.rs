/// Splits a path into its first word and the remainder.
///
/// The split happens on the first whitespace character. Leading whitespace of
/// the remainder is skipped, so runs of whitespace behave as one separator and
/// a trailing separator leaves an empty remainder.
pub fn split_path(path: &str) -> (&str, &str) {
    match path.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim_start()),
        None => (path, ""),
    }
}

/// Drops the first `words` words of `path`, returning what is left.
pub fn skip_words(path: &str, words: usize) -> &str {
    let mut rest = path.trim_start();
    for _ in 0..words {
        rest = split_path(rest).1;
    }
    rest
}

/// Joins the first `words` words of `path` with single spaces.
pub fn leading_words(path: &str, words: usize) -> String {
    path.split_whitespace().take(words).collect::<Vec<_>>().join(" ")
}

/// Collapses every whitespace run in `path` to a single space.
pub fn normalize(path: &str) -> String {
    path.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Appends `word` to `prefix`, separated by a space when the prefix is not empty.
pub fn join_path(prefix: &str, word: &str) -> String {
    if prefix.is_empty() {
        word.to_owned()
    } else {
        format!("{} {}", prefix, word)
    }
}
