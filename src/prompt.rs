//! Interactive stdin prompts.
//!
//! Every destructive step sits behind one of these; declining anywhere is a
//! clean early exit, so the parsing helpers are kept pure and tested.

use std::io::{self, Write};

/// Ask a yes/no question, defaulting to no.
pub fn confirm(question: &str) -> io::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(parse_yes(&input))
}

/// Present a numbered menu and read a 1-based selection.
///
/// Invalid input re-prompts; empty input (or EOF) cancels and returns `None`.
pub fn select(prompt: &str, items: &[String]) -> io::Result<Option<usize>> {
    for (i, item) in items.iter().enumerate() {
        println!("  {}) {}", i + 1, item);
    }

    loop {
        print!("{} (1-{}, empty to cancel): ", prompt, items.len());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        if input.trim().is_empty() {
            return Ok(None);
        }
        match parse_selection(&input, items.len()) {
            Some(idx) => return Ok(Some(idx)),
            None => println!("Please enter a number between 1 and {}.", items.len()),
        }
    }
}

/// True for "y"/"yes" in any case, false for everything else.
pub fn parse_yes(input: &str) -> bool {
    let t = input.trim();
    t.eq_ignore_ascii_case("y") || t.eq_ignore_ascii_case("yes")
}

/// Parse a 1-based menu choice into a 0-based index.
pub fn parse_selection(input: &str, len: usize) -> Option<usize> {
    let n = input.trim().parse::<usize>().ok()?;
    (n >= 1 && n <= len).then(|| n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yes() {
        assert!(parse_yes("y"));
        assert!(parse_yes("Y"));
        assert!(parse_yes("yes"));
        assert!(parse_yes("YES\n"));
        assert!(parse_yes(" y \n"));
    }

    #[test]
    fn test_parse_yes_defaults_to_no() {
        assert!(!parse_yes(""));
        assert!(!parse_yes("\n"));
        assert!(!parse_yes("n"));
        assert!(!parse_yes("no"));
        assert!(!parse_yes("yep"));
    }

    #[test]
    fn test_parse_selection_in_range() {
        assert_eq!(parse_selection("1\n", 3), Some(0));
        assert_eq!(parse_selection("3", 3), Some(2));
        assert_eq!(parse_selection("  2  ", 3), Some(1));
    }

    #[test]
    fn test_parse_selection_out_of_range() {
        assert_eq!(parse_selection("0", 3), None);
        assert_eq!(parse_selection("4", 3), None);
        assert_eq!(parse_selection("-1", 3), None);
        assert_eq!(parse_selection("abc", 3), None);
        assert_eq!(parse_selection("", 3), None);
    }
}
