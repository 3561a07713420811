use thiserror::Error;

use crate::payment::PaymentStatus;

/// Seconds the customer waits on the transfer page before "I have paid" unlocks.
pub const TRANSFER_COUNTDOWN_SECS: u32 = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferPhase {
    AwaitingTransfer { remaining: u32 },
    ReadyToConfirm,
    Checking,
    Confirmed(PaymentStatus),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("payment can't be confirmed until the transfer window has elapsed")]
    StillAwaitingTransfer,
    #[error("a payment check is already in progress")]
    CheckInProgress,
    #[error("no payment check is in progress")]
    NotChecking,
    #[error("this booking has already been confirmed or cancelled")]
    Finished,
}

/// Client-side countdown and confirmation state for the transfer page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferFlow {
    phase: TransferPhase,
    window: u32,
}

impl Default for TransferFlow {
    fn default() -> Self {
        Self::with_window(TRANSFER_COUNTDOWN_SECS)
    }
}

impl TransferFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(secs: u32) -> Self {
        let phase = if secs == 0 {
            TransferPhase::ReadyToConfirm
        } else {
            TransferPhase::AwaitingTransfer { remaining: secs }
        };
        Self {
            phase,
            window: secs,
        }
    }

    pub fn phase(&self) -> &TransferPhase {
        &self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        match self.phase {
            TransferPhase::AwaitingTransfer { remaining } => remaining,
            _ => 0,
        }
    }

    /// One second elapsed. Only meaningful while awaiting the transfer.
    pub fn tick(&mut self) {
        if let TransferPhase::AwaitingTransfer { remaining } = self.phase {
            self.phase = match remaining.saturating_sub(1) {
                0 => TransferPhase::ReadyToConfirm,
                left => TransferPhase::AwaitingTransfer { remaining: left },
            };
        }
    }

    pub fn progress_percent(&self) -> u8 {
        if self.window == 0 {
            return 100;
        }
        let elapsed = self.window - self.remaining_secs().min(self.window);
        (u64::from(elapsed) * 100 / u64::from(self.window)) as u8
    }

    pub fn can_confirm(&self) -> bool {
        self.phase == TransferPhase::ReadyToConfirm
    }

    pub fn is_checking(&self) -> bool {
        self.phase == TransferPhase::Checking
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self.phase,
            TransferPhase::Confirmed(_) | TransferPhase::Cancelled
        )
    }

    /// Cancelling is blocked while a check or the post-confirmation redirect is under way.
    pub fn can_cancel(&self) -> bool {
        !self.is_checking() && !self.is_finished()
    }

    pub fn begin_check(&mut self) -> Result<(), TransferError> {
        match self.phase {
            TransferPhase::ReadyToConfirm => {
                self.phase = TransferPhase::Checking;
                Ok(())
            }
            TransferPhase::AwaitingTransfer { .. } => Err(TransferError::StillAwaitingTransfer),
            TransferPhase::Checking => Err(TransferError::CheckInProgress),
            TransferPhase::Confirmed(_) | TransferPhase::Cancelled => Err(TransferError::Finished),
        }
    }

    /// The check request failed; the customer may try again.
    pub fn check_failed(&mut self) -> Result<(), TransferError> {
        if !self.is_checking() {
            return Err(TransferError::NotChecking);
        }
        self.phase = TransferPhase::ReadyToConfirm;
        Ok(())
    }

    pub fn check_succeeded(&mut self, status: PaymentStatus) -> Result<(), TransferError> {
        if !self.is_checking() {
            return Err(TransferError::NotChecking);
        }
        self.phase = TransferPhase::Confirmed(status);
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), TransferError> {
        if self.is_checking() {
            return Err(TransferError::CheckInProgress);
        }
        if self.is_finished() {
            return Err(TransferError::Finished);
        }
        self.phase = TransferPhase::Cancelled;
        Ok(())
    }
}
