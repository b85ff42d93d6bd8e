//! Estados de una sesión de transferencia.
//!
//! ```text
//! AwaitingRequest -> Validating -> Streaming -> Closing -> Done
//!        |               |                        ^
//!        +---------------+------------------------+
//!        (recv falla)    (no es `GET /`)
//! ```

/// Estado de una `TransferSession`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Esperando el primer bloque del request (recv bloqueante)
    AwaitingRequest,

    /// Comparando el bloque contra `GET /`
    Validating,

    /// Transmitiendo el archivo y consultando la fuente de señales
    Streaming,

    /// Cerrando la conexión y liberando el buffer del request
    Closing,

    /// Terminal
    Done,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::AwaitingRequest => "awaiting_request",
            SessionState::Validating => "validating",
            SessionState::Streaming => "streaming",
            SessionState::Closing => "closing",
            SessionState::Done => "done",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Done)
    }

    /// Transiciones permitidas por la máquina de estados
    pub fn can_transition_to(&self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (AwaitingRequest, Validating)
                | (AwaitingRequest, Closing)
                | (Validating, Streaming)
                | (Validating, Closing)
                | (Streaming, Closing)
                | (Closing, Done)
        )
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_done_is_terminal() {
        assert!(SessionState::Done.is_terminal());
        assert!(!SessionState::Closing.is_terminal());
        assert!(!SessionState::AwaitingRequest.is_terminal());
    }

    #[test]
    fn test_happy_path_transitions() {
        use SessionState::*;
        let path = [AwaitingRequest, Validating, Streaming, Closing, Done];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_short_circuits_go_to_closing() {
        use SessionState::*;
        assert!(AwaitingRequest.can_transition_to(Closing));
        assert!(Validating.can_transition_to(Closing));
        assert!(!AwaitingRequest.can_transition_to(Streaming));
        assert!(!Streaming.can_transition_to(Done));
        assert!(!Done.can_transition_to(AwaitingRequest));
    }
}
