/// A token within a string which may contain a date.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) enum Token<'raw> {
  /// A run of ASCII digits.
  Number(&'raw str),
  /// A run of alphabetic characters.
  Word(&'raw str),
  /// Any other non-whitespace character.
  Punct(char),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Class {
  Digit,
  Alphabetic,
  Other,
}

fn class(char: char) -> Class {
  if char.is_ascii_digit() {
    Class::Digit
  } else if char.is_alphabetic() {
    Class::Alphabetic
  } else {
    Class::Other
  }
}

/// Split a string into runs of digits, runs of letters, and punctuation.
///
/// Whitespace separates tokens yet is otherwise discarded.
pub(super) fn tokenize(raw: &str) -> Vec<Token<'_>> {
  let mut tokens = vec![];
  let mut chars = raw.char_indices().peekable();
  while let Some((start, char)) = chars.next() {
    if char.is_whitespace() {
      continue;
    }

    let kind = class(char);
    if kind == Class::Other {
      tokens.push(Token::Punct(char));
      continue;
    }

    let mut end = start + char.len_utf8();
    while let Some((i, next)) = chars.next_if(|(_, next)| class(*next) == kind) {
      end = i + next.len_utf8();
    }
    let run = &raw[start .. end];
    tokens.push(if kind == Class::Digit { Token::Number(run) } else { Token::Word(run) });
  }
  tokens
}

#[test]
fn test_tokenize() {
  use Token::*;
  assert_eq!(tokenize(""), Vec::<Token<'_>>::new());
  assert_eq!(
    tokenize("2023-01-01T10:20"),
    [
      Number("2023"),
      Punct('-'),
      Number("01"),
      Punct('-'),
      Number("01"),
      Word("T"),
      Number("10"),
      Punct(':'),
      Number("20")
    ]
  );
  assert_eq!(
    tokenize(" 5th  of Mär, 2023 "),
    [Number("5"), Word("th"), Word("of"), Word("Mär"), Punct(','), Number("2023")]
  );
}
