//! Text to tree. Unfolding and line tokenizing live in the lexer, the
//! `BEGIN`/`END` nesting in the parser.

mod error;
mod lexer;
mod parser;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{parse_content_line, split_lines, unescape_text};
pub use parser::parse;
