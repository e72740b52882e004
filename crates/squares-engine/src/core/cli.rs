/// What the command line asked for. The demos take no options.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Invocation {
    Run,
    Help,
    /// First argument that was not understood.
    Invalid(String),
}

impl Invocation {
    /// Parses arguments after the program name.
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match args.into_iter().next().map(Into::into) {
            None => Invocation::Run,
            Some(a) if a == "-h" || a == "--help" => Invocation::Help,
            Some(a) => Invocation::Invalid(a),
        }
    }
}

/// Usage banner for `program`.
pub fn usage(program: &str) -> String {
    format!("Usage: {program}\n")
}
