use std::fmt::Display;

// Final error handed to the host. Static errors come from the lexer and the
// parser and are batched, runtime errors stop the program.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeErr {
    Static {
        line: u64,
        location: String,
        message: String,
    },
    Runtime {
        line: u64,
        message: String,
    },
}

impl CodeErr {
    pub fn line(&self) -> u64 {
        match self {
            CodeErr::Static { line, .. } | CodeErr::Runtime { line, .. } => *line,
        }
    }

    pub fn is_runtime(&self) -> bool {
        matches!(self, CodeErr::Runtime { .. })
    }
}

impl Display for CodeErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodeErr::Static { line, location, message } => {
                write!(f, "[line {}] Error{}: {}", line, location, message)
            }
            CodeErr::Runtime { line, message } => write!(f, "{}\n[line {}]", message, line),
        }
    }
}

pub trait ReportCodeErr {
    // Location is either empty, " at end" or " at 'lexeme'"
    fn to_glob_err(&self, line: u64, location: &str) -> CodeErr
    where
        Self: Display,
    {
        CodeErr::Static {
            line,
            location: location.to_string(),
            message: self.to_string(),
        }
    }

    fn to_runtime_err(&self, line: u64) -> CodeErr
    where
        Self: Display,
    {
        CodeErr::Runtime {
            line,
            message: self.to_string(),
        }
    }
}
