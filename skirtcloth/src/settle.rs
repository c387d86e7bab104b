use crate::Error;

/// Barrier between changing a cloth in the host scene and reading it back.
///
/// Steps are the host simulator's step counter. A sample is allowed once the
/// simulator has advanced past the step at which the settle was requested.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SettleTicket {
    requested_at: u64,
}

impl SettleTicket {
    pub fn request(step: u64) -> Self {
        Self { requested_at: step }
    }

    pub fn requested_at(&self) -> u64 {
        self.requested_at
    }

    pub fn is_settled(&self, step: u64) -> bool {
        step > self.requested_at
    }

    /// Runs `read` if the simulator has stepped since the request.
    pub fn sample<T>(&self, step: u64, read: impl FnOnce() -> T) -> Result<T, Error> {
        if !self.is_settled(step) {
            return Err(Error::NotSettled {
                requested: self.requested_at,
                current: step,
            });
        }
        Ok(read())
    }
}
