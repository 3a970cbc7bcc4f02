use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// The phases one guardian moves through in a decryption round, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Key material exists locally; nothing has been published.
    KeyGenerated,
    /// The public key record has been broadcast to the other participants.
    PublicKeyShared,
    /// Shares for the tally and all spoiled ballots have been computed.
    SharesComputed,
    /// The other guardians have verified this guardian's shares.
    SharesVerifiedByPeers,
}

impl RoundPhase {
    fn successor(self) -> Option<RoundPhase> {
        match self {
            RoundPhase::KeyGenerated => Some(RoundPhase::PublicKeyShared),
            RoundPhase::PublicKeyShared => Some(RoundPhase::SharesComputed),
            RoundPhase::SharesComputed => Some(RoundPhase::SharesVerifiedByPeers),
            RoundPhase::SharesVerifiedByPeers => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot move from {from:?} to {to:?}; phases advance one step at a time")]
    OutOfOrder { from: RoundPhase, to: RoundPhase },
}

/// Tracks one guardian's progress through a decryption round.  Phases only
/// ever advance, one step at a time; skipping a phase or moving backwards is
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecryptionRound {
    guardian_id: String,
    phase: RoundPhase,
}

impl DecryptionRound {
    pub fn new(guardian_id: String) -> DecryptionRound {
        DecryptionRound {
            guardian_id,
            phase: RoundPhase::KeyGenerated,
        }
    }

    pub fn guardian_id(&self) -> &str {
        &self.guardian_id
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Record that the guardian's public key record has been broadcast.
    pub fn share_public_key(&mut self) -> Result<(), TransitionError> {
        self.advance(RoundPhase::PublicKeyShared)
    }

    /// Record that all of the guardian's shares have been computed.
    pub fn record_shares_computed(&mut self) -> Result<(), TransitionError> {
        self.advance(RoundPhase::SharesComputed)
    }

    /// Record that the other guardians have verified the shares.
    pub fn record_peer_verification(&mut self) -> Result<(), TransitionError> {
        self.advance(RoundPhase::SharesVerifiedByPeers)
    }

    fn advance(&mut self, to: RoundPhase) -> Result<(), TransitionError> {
        if self.phase.successor() != Some(to) {
            return Err(TransitionError::OutOfOrder {
                from: self.phase,
                to,
            });
        }
        debug!(guardian_id = %self.guardian_id, phase = ?to, "decryption round advanced");
        self.phase = to;
        Ok(())
    }
}
