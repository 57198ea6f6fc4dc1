//! Session command language
//!
//! One command per line. The keyword is case-insensitive, arguments are
//! separated by whitespace, and arguments are kept as text so the engine can
//! apply its own input coercion and report the matching status.
//!
//! ```text
//! add <id> <qty>          remove <id> <qty>       cart
//! checkout                clear                   return <id> <qty>
//! inventory               new <id> <price> <qty> <name...>
//! update <id> <price> <qty>                       delete <id>
//! quit | exit
//! ```

use crate::types::PosError;
use std::io::BufRead;
use std::str::FromStr;

/// A parsed session command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Add { id: String, quantity: String },
    Remove { id: String, quantity: String },
    ShowCart,
    Checkout,
    Clear,
    Return { id: String, quantity: String },
    Inventory,
    NewProduct {
        id: String,
        price: String,
        quantity: String,
        name: String,
    },
    Update {
        id: String,
        price: String,
        quantity: String,
    },
    Delete { id: String },
    Quit,
}

impl FromStr for SessionCommand {
    type Err = PosError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let unknown = || PosError::UnknownCommand {
            input: line.trim().to_string(),
        };

        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().ok_or_else(unknown)?.to_lowercase();
        let args: Vec<String> = tokens.map(str::to_string).collect();

        let command = match (keyword.as_str(), args.as_slice()) {
            ("add", [id, quantity]) => SessionCommand::Add {
                id: id.clone(),
                quantity: quantity.clone(),
            },
            ("remove", [id, quantity]) => SessionCommand::Remove {
                id: id.clone(),
                quantity: quantity.clone(),
            },
            ("cart", []) => SessionCommand::ShowCart,
            ("checkout", []) => SessionCommand::Checkout,
            ("clear", []) => SessionCommand::Clear,
            ("return", [id, quantity]) => SessionCommand::Return {
                id: id.clone(),
                quantity: quantity.clone(),
            },
            ("inventory", []) => SessionCommand::Inventory,
            ("new", [id, price, quantity, name @ ..]) if !name.is_empty() => {
                SessionCommand::NewProduct {
                    id: id.clone(),
                    price: price.clone(),
                    quantity: quantity.clone(),
                    name: name.join(" "),
                }
            }
            ("update", [id, price, quantity]) => SessionCommand::Update {
                id: id.clone(),
                price: price.clone(),
                quantity: quantity.clone(),
            },
            ("delete", [id]) => SessionCommand::Delete { id: id.clone() },
            ("quit" | "exit", []) => SessionCommand::Quit,
            _ => return Err(unknown()),
        };

        Ok(command)
    }
}

/// Split a `sell` item of the form `ID:QTY`
///
/// The split happens at the last colon so ids may themselves contain colons.
/// Returns `None` if there is no colon or either side is empty.
pub fn parse_sale_item(item: &str) -> Option<(&str, &str)> {
    let (id, quantity) = item.rsplit_once(':')?;
    if id.is_empty() || quantity.is_empty() {
        return None;
    }
    Some((id, quantity))
}

/// Iterator over the commands in a session script
///
/// Blank lines and lines starting with `#` are skipped. Each item carries the
/// 1-based line number it came from. A line that is not valid UTF-8 yields an
/// `UnknownCommand` error and reading continues; only a failing stream
/// yields a fatal I/O error.
pub struct CommandReader<B> {
    lines: std::io::Split<B>,
    line_num: usize,
}

impl<B: BufRead> CommandReader<B> {
    pub fn new(input: B) -> Self {
        CommandReader {
            lines: input.split(b'\n'),
            line_num: 0,
        }
    }
}

impl<B: BufRead> Iterator for CommandReader<B> {
    type Item = (usize, Result<SessionCommand, PosError>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_num += 1;

            let line = match line {
                Ok(bytes) => match String::from_utf8(bytes) {
                    Ok(line) => line,
                    Err(e) => {
                        let input = String::from_utf8_lossy(e.as_bytes()).trim().to_string();
                        return Some((self.line_num, Err(PosError::UnknownCommand { input })));
                    }
                },
                Err(e) => return Some((self.line_num, Err(e.into()))),
            };

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            return Some((self.line_num, trimmed.parse()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn add(id: &str, quantity: &str) -> SessionCommand {
        SessionCommand::Add {
            id: id.to_string(),
            quantity: quantity.to_string(),
        }
    }

    #[rstest]
    #[case::add("add 101 3", add("101", "3"))]
    #[case::add_upper("ADD 101 3", add("101", "3"))]
    #[case::add_padded("  add   101   3  ", add("101", "3"))]
    #[case::remove(
        "remove 101 1",
        SessionCommand::Remove { id: "101".to_string(), quantity: "1".to_string() }
    )]
    #[case::cart("cart", SessionCommand::ShowCart)]
    #[case::checkout("checkout", SessionCommand::Checkout)]
    #[case::clear("clear", SessionCommand::Clear)]
    #[case::return_item(
        "return 202 2",
        SessionCommand::Return { id: "202".to_string(), quantity: "2".to_string() }
    )]
    #[case::inventory("inventory", SessionCommand::Inventory)]
    #[case::new_product(
        "new 404 1.5 12 Blue Ink Pen",
        SessionCommand::NewProduct {
            id: "404".to_string(),
            price: "1.5".to_string(),
            quantity: "12".to_string(),
            name: "Blue Ink Pen".to_string(),
        }
    )]
    #[case::update(
        "update 202 3.0 20",
        SessionCommand::Update {
            id: "202".to_string(),
            price: "3.0".to_string(),
            quantity: "20".to_string(),
        }
    )]
    #[case::delete("delete 999", SessionCommand::Delete { id: "999".to_string() })]
    #[case::quit("quit", SessionCommand::Quit)]
    #[case::exit("exit", SessionCommand::Quit)]
    fn test_parse_command(#[case] line: &str, #[case] expected: SessionCommand) {
        assert_eq!(line.parse::<SessionCommand>(), Ok(expected));
    }

    #[rstest]
    #[case::unknown_keyword("sell 101 3")]
    #[case::missing_argument("add 101")]
    #[case::extra_argument("checkout now")]
    #[case::new_without_name("new 404 1.5 12")]
    #[case::empty("")]
    fn test_parse_command_rejected(#[case] line: &str) {
        let error = line.parse::<SessionCommand>().unwrap_err();
        assert!(matches!(error, PosError::UnknownCommand { .. }));
        assert!(!error.is_fatal());
    }

    #[rstest]
    #[case::plain("101:3", Some(("101", "3")))]
    #[case::colon_in_id("A:1:2", Some(("A:1", "2")))]
    #[case::no_colon("101", None)]
    #[case::empty_quantity("101:", None)]
    #[case::empty_id(":3", None)]
    fn test_parse_sale_item(#[case] item: &str, #[case] expected: Option<(&str, &str)>) {
        assert_eq!(parse_sale_item(item), expected);
    }

    #[test]
    fn test_command_reader_skips_blank_and_comment_lines() {
        let script = "# opening\n\nadd 101 3\n   \ncheckout\n";

        let commands: Vec<_> = CommandReader::new(script.as_bytes()).collect();

        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0], (3, Ok(add("101", "3"))));
        assert_eq!(commands[1], (5, Ok(SessionCommand::Checkout)));
    }

    #[test]
    fn test_command_reader_yields_errors_in_place() {
        let script = "add 101 3\nbogus\ncheckout\n";

        let commands: Vec<_> = CommandReader::new(script.as_bytes()).collect();

        assert_eq!(commands.len(), 3);
        assert!(commands[1].1.is_err());
        assert_eq!(commands[1].0, 2);
        assert_eq!(commands[2].1, Ok(SessionCommand::Checkout));
    }

    #[test]
    fn test_command_reader_rejects_invalid_utf8_line_and_continues() {
        let script: &[u8] = b"add 101 1\nadd \xff 1\r\ncart\n";

        let commands: Vec<_> = CommandReader::new(script).collect();

        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0], (1, Ok(add("101", "1"))));
        let (line_num, rejected) = &commands[1];
        assert_eq!(*line_num, 2);
        let error = rejected.as_ref().unwrap_err();
        assert!(matches!(error, PosError::UnknownCommand { .. }));
        assert!(!error.is_fatal());
        assert_eq!(commands[2], (3, Ok(SessionCommand::ShowCart)));
    }

    #[test]
    fn test_command_reader_accepts_crlf_lines() {
        let commands: Vec<_> = CommandReader::new("cart\r\ncheckout\r\n".as_bytes()).collect();
        assert_eq!(commands[0], (1, Ok(SessionCommand::ShowCart)));
        assert_eq!(commands[1], (2, Ok(SessionCommand::Checkout)));
    }
}
