//! Hand-checked scenarios with known outcomes.

use capmatch_core::Problem;

use crate::builder::ProblemBuilder;

/// Three students of three programs, all preferring `T01..T05` in order.
///
/// Expected: `BDBA001`→T01/SUP01 and `BBA_BDBA001`→T01/SUP02 in round 1;
/// BCSAI has no coverage on T01, so `BCSAI001`→T02/SUP02 in round 2.
/// Final loads 1/5 and 2/4.
pub fn scenario_a() -> Problem {
    ProblemBuilder::new()
        .student("BDBA001", ["T01", "T02", "T03", "T04", "T05"])
        .student("BCSAI001", ["T01", "T02", "T03", "T04", "T05"])
        .student("BBA_BDBA001", ["T01", "T02", "T03", "T04", "T05"])
        .topic("T01", "Data Science")
        .topic("T02", "Data Science")
        .topic("T03", "Machine Learning")
        .topic("T04", "Machine Learning")
        .topic("T05", "Computer Science")
        .supervisor(
            "SUP01",
            5,
            &["BDBA:T01:Expert", "BDBA:T03:Advanced", "BDBA:T05:Intermediate"],
        )
        .supervisor(
            "SUP02",
            4,
            &["BCSAI:T02:Expert", "BCSAI:T04:Advanced", "BBA+BDBA:T01:Expert"],
        )
        .build()
        .expect("scenario A is valid")
}

/// Two BDBA students competing for T01 at a supervisor of capacity 1.
///
/// Expected: `BDBA001` gets T01 in round 1; `BDBA002` gets T02 in round 2.
pub fn scenario_b() -> Problem {
    ProblemBuilder::new()
        .student("BDBA002", ["T01", "T02", "T03", "T04", "T05"])
        .student("BDBA001", ["T01", "T02", "T03", "T04", "T05"])
        .numbered_topics(5, "Data Science")
        .supervisor("SUP01", 1, &["BDBA:T01:Expert"])
        .supervisor("SUP02", 3, &["BDBA:T02:Advanced"])
        .build()
        .expect("scenario B is valid")
}

/// A BBA student whose program has no coverage for any preferred topic.
///
/// Expected: `BBA001` stays unmatched; every preference reports missing
/// supervisor coverage.
pub fn scenario_c() -> Problem {
    ProblemBuilder::new()
        .student("BBA001", ["T01", "T02", "T03", "T04", "T05"])
        .student("BDBA001", ["T01", "T02", "T03", "T04", "T05"])
        .numbered_topics(5, "Finance")
        .supervisor(
            "SUP01",
            2,
            &["BDBA:T01:Expert", "BCSAI:T02:Expert", "BBA+BDBA:T03:Beginner"],
        )
        .build()
        .expect("scenario C is valid")
}
