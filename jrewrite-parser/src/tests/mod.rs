// Unit tests for the Java rewrite parser
// Each module covers one area of the library

mod test_attribution;
mod test_batch_parsing;
mod test_change;
mod test_expressions;
mod test_formatter;
mod test_qualified_names;
