pub mod newline;
