//! Declarative command-line option parsing.
//!
//! Options are described once with a builder, frozen, and collected into a
//! [`Parser`]. Parsing an argument vector either yields every value, already
//! converted to its option's type, or the full list of problems found.
//!
//! ```
//! use optspec::{Parser, option, transform};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let size = option("size")
//!     .alias("s")
//!     .described_as("length of the given word")
//!     .parse_as(transform::map(|s: &str| s.len()))?;
//! let verbose = option("verbose")
//!     .alias("v")
//!     .depends_on("size")
//!     .described_as("print more")
//!     .parse_as(transform::flag())?;
//!
//! let parser = Parser::builder().option(&size).option(&verbose).build()?;
//!
//! let result = parser.parse(&["-size", "hello", "-verbose"])?;
//! assert_eq!(result.get(&size), Some(&5));
//! assert_eq!(result.get(&verbose), Some(&true));
//!
//! let errors = parser.parse(&["-verbose"]).unwrap_err();
//! assert_eq!(errors.to_string(), "option 'verbose' requires 'size'");
//! # Ok(())
//! # }
//! ```
//!
//! Flow: [`tokenize`] splits the vector into flag and value tokens, the
//! [`OptionRegistry`] resolves flags to options, values are converted by each
//! option's [`OptionParser`], and [`validate_dependencies`] runs last.

pub mod config;
pub mod error;
pub mod option;
pub mod parser;
pub mod registry;
pub mod result;
pub mod token;
pub mod transform;
pub mod validate;

pub use config::{DEFAULT_OPTION_PREFIX, ParserConfiguration, UnknownOptions};
pub use error::{ConfigError, ParseError, ParseErrors, ValueRange};
pub use option::{ARITY_UNBOUNDED, AnyOption, Arity, OptionBuilder, OptionSpec, option};
pub use parser::{Parser, ParserBuilder};
pub use registry::OptionRegistry;
pub use result::ParseResult;
pub use token::{Token, tokenize};
pub use transform::{OptionParser, TransformError};
pub use validate::validate_dependencies;
