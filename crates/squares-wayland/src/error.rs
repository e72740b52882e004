use std::fmt;

use wayland_client::ConnectError;

/// Failure to reach the compositor or to find what the client needs there.
#[derive(Debug)]
pub enum ConnectionError {
    Connect(ConnectError),
    /// A required global was not advertised by the registry.
    MissingGlobal(&'static str),
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::Connect(e) => write!(f, "failed to connect to the compositor: {e}"),
            ConnectionError::MissingGlobal(interface) => {
                write!(f, "compositor does not advertise {interface}")
            }
        }
    }
}

impl std::error::Error for ConnectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConnectionError::Connect(e) => Some(e),
            ConnectionError::MissingGlobal(_) => None,
        }
    }
}

impl From<ConnectError> for ConnectionError {
    fn from(e: ConnectError) -> Self {
        ConnectionError::Connect(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_global_names_the_interface() {
        let e = ConnectionError::MissingGlobal("xdg_wm_base");
        assert_eq!(e.to_string(), "compositor does not advertise xdg_wm_base");
    }

    #[test]
    fn connect_errors_keep_their_source() {
        let e = ConnectionError::from(ConnectError::NoCompositor);
        assert!(std::error::Error::source(&e).is_some());
        assert!(e.to_string().starts_with("failed to connect to the compositor"));
    }
}
