//! The read contract for externally produced ciphertext trees.  The
//! encryption pipeline that builds these lives upstream; this crate only ever
//! walks them, so each node carries exactly what share computation and
//! verification need: object id, sequence order, description hash, and (at
//! the leaves) the ElGamal ciphertext.

pub mod ballot;
pub mod contest;
pub mod selection;
pub mod tally;

pub use ballot::Ballot;
pub use contest::{BallotContest, TallyContest};
pub use selection::{BallotSelection, CiphertextSelection, TallySelection};
pub use tally::Tally;
