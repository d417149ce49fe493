use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("scene host is already attached")]
    AlreadyAttached,
    #[error("scene host was detached and cannot be attached again")]
    Detached,
    #[error("browser environment unavailable: {0}")]
    Environment(String),
}

/// Attach/detach rules for the scene host: attach once, detach once, never
/// re-attach. `Attaching` covers the awaits between registering listeners
/// and starting the frame loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HostPhase {
    #[default]
    Idle,
    Attaching,
    Attached,
    Detached,
}

impl HostPhase {
    pub fn begin_attach(&mut self) -> Result<(), HostError> {
        match *self {
            HostPhase::Idle => {
                *self = HostPhase::Attaching;
                Ok(())
            }
            HostPhase::Attaching | HostPhase::Attached => Err(HostError::AlreadyAttached),
            HostPhase::Detached => Err(HostError::Detached),
        }
    }

    /// Complete an in-flight attach. If a detach was requested meanwhile the
    /// phase stays `Attaching` and `Detached` is returned, so the following
    /// `begin_detach` still undoes the partial setup.
    pub fn finish_attach(&mut self, detach_requested: bool) -> Result<(), HostError> {
        match *self {
            HostPhase::Attaching if detach_requested => Err(HostError::Detached),
            HostPhase::Attaching => {
                *self = HostPhase::Attached;
                Ok(())
            }
            HostPhase::Attached => Err(HostError::AlreadyAttached),
            HostPhase::Idle | HostPhase::Detached => Err(HostError::Detached),
        }
    }

    /// Returns `true` if this call performed the detach and registrations must
    /// be undone. Detaching an idle or already detached host is a no-op.
    pub fn begin_detach(&mut self) -> bool {
        match *self {
            HostPhase::Attaching | HostPhase::Attached => {
                *self = HostPhase::Detached;
                true
            }
            HostPhase::Idle => {
                *self = HostPhase::Detached;
                false
            }
            HostPhase::Detached => false,
        }
    }
}

/// Shared flag for a shutdown that arrives while the host is still attaching
/// and therefore not reachable by the caller.
#[derive(Debug, Clone, Default)]
pub struct DetachRequest(Rc<Cell<bool>>);

impl DetachRequest {
    pub fn request(&self) {
        self.0.set(true);
    }

    pub fn is_requested(&self) -> bool {
        self.0.get()
    }
}
