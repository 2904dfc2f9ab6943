use thiserror::Error;

pub mod types;
pub mod utils;
pub mod env;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }
}
