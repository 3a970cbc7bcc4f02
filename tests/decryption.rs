//! End-to-end scenarios: run a key ceremony for several guardians, encrypt a
//! small tally and a spoiled ballot against the joint key, compute each
//! guardian's decryption shares, and verify them (including that tampered
//! shares are rejected).

use std::collections::BTreeMap;

use num::BigUint;
use rand::Rng;

use electionguard_decryption::crypto::elgamal::Message;
use electionguard_decryption::crypto::group::{generator, prime, random_exponent, Element};
use electionguard_decryption::election::{
    compute_base_hash, compute_extended_base_hash, compute_joint_public_key, Parameters,
};
use electionguard_decryption::encrypted::{
    Ballot, BallotContest, BallotSelection, Tally, TallyContest, TallySelection,
};
use electionguard_decryption::errors::ErrorContext;
use electionguard_decryption::guardian::Guardian;

const NUM_GUARDIANS: u64 = 5;
const QUORUM: usize = 3;

struct Election {
    guardians: Vec<Guardian>,
    joint_key: Element,
    extended_base_hash: BigUint,
}

fn setup(rng: &mut impl Rng) -> Election {
    let guardians: Vec<Guardian> = (1..=NUM_GUARDIANS)
        .map(|i| Guardian::generate(format!("guardian-{}", i), i, QUORUM, rng).unwrap())
        .collect();
    let public_keys: Vec<_> = guardians.iter().map(Guardian::public_key).collect();
    for key in &public_keys {
        assert!(key.is_valid());
    }

    let parameters = Parameters {
        num_guardians: NUM_GUARDIANS,
        quorum: QUORUM as u64,
        prime: prime().clone(),
        generator: generator().as_uint().clone(),
    };
    let base_hash = compute_base_hash(&parameters);
    let extended_base_hash = compute_extended_base_hash(&base_hash, &public_keys);
    let joint_key = compute_joint_public_key(&public_keys);

    Election {
        guardians,
        joint_key,
        extended_base_hash,
    }
}

fn tally_selection(
    joint_key: &Element,
    object_id: &str,
    sequence_order: u64,
    count: u32,
    rng: &mut impl Rng,
) -> TallySelection {
    TallySelection {
        object_id: object_id.to_owned(),
        sequence_order,
        description_hash: BigUint::from(7 * sequence_order),
        message: Message::encrypt(joint_key, &count.into(), &random_exponent(rng)),
    }
}

fn sample_tally(joint_key: &Element, rng: &mut impl Rng) -> Tally {
    let mut contests = BTreeMap::new();

    let mayor: BTreeMap<String, TallySelection> = [("alpha", 1, 12_u32), ("beta", 2, 30)]
        .iter()
        .map(|&(name, seq, count)| {
            (
                format!("mayor-{}", name),
                tally_selection(joint_key, &format!("mayor-{}", name), seq, count, rng),
            )
        })
        .collect();
    contests.insert(
        "contest-mayor".to_owned(),
        TallyContest {
            object_id: "contest-mayor".to_owned(),
            sequence_order: 1,
            description_hash: 1001_u32.into(),
            selections: mayor,
        },
    );

    let mut referendum = BTreeMap::new();
    referendum.insert(
        "referendum-yes".to_owned(),
        tally_selection(joint_key, "referendum-yes", 1, 25, rng),
    );
    contests.insert(
        "contest-referendum".to_owned(),
        TallyContest {
            object_id: "contest-referendum".to_owned(),
            sequence_order: 2,
            description_hash: 1002_u32.into(),
            selections: referendum,
        },
    );

    Tally {
        tally_id: "tally-2026-general".to_owned(),
        contests,
    }
}

fn sample_ballot(joint_key: &Element, rng: &mut impl Rng) -> Ballot {
    let selections = (1..=3_u64)
        .map(|seq| BallotSelection {
            object_id: format!("mayor-choice-{}", seq),
            sequence_order: seq,
            description_hash: (100 + seq).into(),
            message: Message::encrypt(
                joint_key,
                &u32::from(seq == 2).into(),
                &random_exponent(rng),
            ),
            is_placeholder: seq == 3,
        })
        .collect();

    Ballot {
        object_id: "ballot-0042".to_owned(),
        contests: vec![BallotContest {
            object_id: "contest-mayor".to_owned(),
            sequence_order: 1,
            description_hash: 1001_u32.into(),
            selections,
            extended_data: Some(Message::encrypt(
                joint_key,
                &77_u32.into(),
                &random_exponent(rng),
            )),
        }],
    }
}

#[test]
fn tally_shares_verify_against_their_own_guardian() {
    let mut rng = rand::thread_rng();
    let election = setup(&mut rng);
    let tally = sample_tally(&election.joint_key, &mut rng);

    for guardian in &election.guardians {
        let share = guardian.compute_tally_share(&tally, &election.extended_base_hash, &mut rng);
        assert!(share.is_valid(
            &tally,
            &guardian.public_key(),
            &election.extended_base_hash
        ));
    }
}

#[test]
fn tally_share_fails_against_the_wrong_guardian() {
    let mut rng = rand::thread_rng();
    let election = setup(&mut rng);
    let tally = sample_tally(&election.joint_key, &mut rng);

    let share = election.guardians[0].compute_tally_share(
        &tally,
        &election.extended_base_hash,
        &mut rng,
    );
    assert!(!share.is_valid(
        &tally,
        &election.guardians[1].public_key(),
        &election.extended_base_hash
    ));
}

#[test]
fn ballot_share_verifies_and_covers_extended_data() {
    let mut rng = rand::thread_rng();
    let election = setup(&mut rng);
    let ballot = sample_ballot(&election.joint_key, &mut rng);

    let guardian = &election.guardians[2];
    let share = guardian.compute_ballot_share(
        "tally-2026-general",
        &ballot,
        &election.extended_base_hash,
        &mut rng,
    );
    assert_eq!(share.tally_id, "tally-2026-general");
    assert!(share.contests["contest-mayor"].extended_data.is_some());
    assert!(share.is_valid(
        &ballot,
        &guardian.public_key(),
        &election.extended_base_hash
    ));
}

#[test]
fn tampering_with_a_share_is_detected() {
    let mut rng = rand::thread_rng();
    let election = setup(&mut rng);
    let tally = sample_tally(&election.joint_key, &mut rng);
    let guardian = &election.guardians[0];
    let key = guardian.public_key();

    let pristine =
        guardian.compute_tally_share(&tally, &election.extended_base_hash, &mut rng);
    assert!(pristine.is_valid(&tally, &key, &election.extended_base_hash));

    // Substituted share value.
    let mut tampered = pristine.clone();
    {
        let selection = tampered
            .contests
            .get_mut("contest-mayor")
            .unwrap()
            .selections
            .get_mut("mayor-alpha")
            .unwrap();
        selection.share = &selection.share * &selection.share;
    }
    assert!(!tampered.is_valid(&tally, &key, &election.extended_base_hash));

    // Altered description hash.
    let mut tampered = pristine.clone();
    tampered
        .contests
        .get_mut("contest-referendum")
        .unwrap()
        .description_hash = 9999_u32.into();
    assert!(!tampered.is_valid(&tally, &key, &election.extended_base_hash));

    // Reassigned guardian id.
    let mut tampered = pristine.clone();
    tampered.guardian_id = "guardian-2".to_owned();
    assert!(!tampered.is_valid(&tally, &key, &election.extended_base_hash));

    // Dropped selection.
    let mut tampered = pristine.clone();
    tampered
        .contests
        .get_mut("contest-mayor")
        .unwrap()
        .selections
        .remove("mayor-beta");
    assert!(!tampered.is_valid(&tally, &key, &election.extended_base_hash));
}

#[test]
fn check_reports_every_failure_with_its_cause() {
    let mut rng = rand::thread_rng();
    let election = setup(&mut rng);
    let tally = sample_tally(&election.joint_key, &mut rng);
    let guardian = &election.guardians[0];

    let mut share =
        guardian.compute_tally_share(&tally, &election.extended_base_hash, &mut rng);
    share.guardian_id = "guardian-9".to_owned();
    {
        let selection = share
            .contests
            .get_mut("contest-mayor")
            .unwrap()
            .selections
            .get_mut("mayor-alpha")
            .unwrap();
        selection.share = &selection.share * &selection.share;
    }

    let mut errs = Vec::new();
    share.check(
        &tally,
        &guardian.public_key(),
        &election.extended_base_hash,
        &mut ErrorContext::new(&mut errs),
    );

    assert!(errs
        .iter()
        .any(|e| e.contains("not produced by the claimed guardian")));
    assert!(errs
        .iter()
        .any(|e| e.contains("does not certify the share value")));
    // An identity failure and a proof failure are reported as distinct causes.
    assert!(errs.len() >= 2);
}

#[test]
fn share_values_are_deterministic_per_guardian() {
    let mut rng = rand::thread_rng();
    let election = setup(&mut rng);
    let tally = sample_tally(&election.joint_key, &mut rng);
    let guardian = &election.guardians[3];

    let first = guardian.compute_tally_share(&tally, &election.extended_base_hash, &mut rng);
    let second = guardian.compute_tally_share(&tally, &election.extended_base_hash, &mut rng);

    // The share values depend only on the ciphertext and the secret key; the
    // proofs use fresh randomness each time.
    for (contest_id, contest) in &first.contests {
        for (selection_id, selection) in &contest.selections {
            assert_eq!(
                selection.share,
                second.contests[contest_id].selections[selection_id].share
            );
        }
    }
}

#[test]
fn distinct_guardians_produce_distinct_shares() {
    let mut rng = rand::thread_rng();
    let election = setup(&mut rng);
    let tally = sample_tally(&election.joint_key, &mut rng);

    let shares: Vec<_> = election
        .guardians
        .iter()
        .map(|g| g.compute_tally_share(&tally, &election.extended_base_hash, &mut rng))
        .collect();

    for i in 0..shares.len() {
        for j in i + 1..shares.len() {
            assert_ne!(
                shares[i].contests["contest-referendum"].selections["referendum-yes"].share,
                shares[j].contests["contest-referendum"].selections["referendum-yes"].share
            );
        }
    }
}

#[test]
fn batch_computation_covers_tally_and_every_ballot() {
    let mut rng = rand::thread_rng();
    let election = setup(&mut rng);
    let tally = sample_tally(&election.joint_key, &mut rng);
    let ballots = vec![sample_ballot(&election.joint_key, &mut rng)];

    let guardian = &election.guardians[1];
    let (tally_share, ballot_shares) = guardian.compute_decryption_shares(
        &tally,
        &ballots,
        &election.extended_base_hash,
        &mut rng,
    );

    assert_eq!(tally_share.tally_id, tally.tally_id);
    assert_eq!(tally_share.contests.len(), tally.contests.len());
    assert_eq!(ballot_shares.len(), 1);
    let ballot_share = &ballot_shares["ballot-0042"];
    assert_eq!(ballot_share.tally_id, tally.tally_id);
    assert!(ballot_share.is_valid(
        &ballots[0],
        &guardian.public_key(),
        &election.extended_base_hash
    ));
}

#[test]
fn tally_share_survives_serialization() {
    let mut rng = rand::thread_rng();
    let election = setup(&mut rng);
    let tally = sample_tally(&election.joint_key, &mut rng);
    let guardian = &election.guardians[0];

    let share = guardian.compute_tally_share(&tally, &election.extended_base_hash, &mut rng);
    let json = serde_json::to_string(&share).unwrap();
    let restored: electionguard_decryption::decryption::TallyShare =
        serde_json::from_str(&json).unwrap();
    assert_eq!(share, restored);
    assert!(restored.is_valid(
        &tally,
        &guardian.public_key(),
        &election.extended_base_hash
    ));
}
