//! Command-line front end for the Career code runner
//!
//! Stands in for the code block viewer: it takes a snippet from a file or
//! stdin, runs it through `career_runner`, and prints the same display string
//! the viewer would show.

pub mod settings;
