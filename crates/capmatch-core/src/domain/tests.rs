//! Tests for the entity model.

use std::collections::BTreeMap;

use super::*;
use crate::error::MatchError;

// ============================================================================
// Program Classification Tests
// ============================================================================

mod program_tests {
    use super::*;

    #[test]
    fn test_classify_priority_order() {
        assert_eq!(Program::classify("BBA_BDBA001"), Program::BbaBdba);
        assert_eq!(Program::classify("BDBA001"), Program::Bdba);
        assert_eq!(Program::classify("BCSAI042"), Program::Bcsai);
        assert_eq!(Program::classify("BBA007"), Program::Bba);
    }

    #[test]
    fn test_classify_other() {
        assert_eq!(Program::classify("BBA_LAW001"), Program::Other);
        assert_eq!(Program::classify("MBA001"), Program::Other);
        assert_eq!(Program::classify(""), Program::Other);
        assert_eq!(Program::classify("bdba001"), Program::Other);
    }

    #[test]
    fn test_labels_round_trip() {
        for program in Program::ALL {
            assert_eq!(program.as_str().parse::<Program>().unwrap(), program);
        }
        assert_eq!(Program::BbaBdba.to_string(), "BBA+BDBA");
        assert!(matches!(
            "MBA".parse::<Program>(),
            Err(MatchError::UnknownProgram(_))
        ));
    }
}

// ============================================================================
// Student Tests
// ============================================================================

mod student_tests {
    use super::*;

    #[test]
    fn test_new_derives_program() {
        let s = Student::new("BBA_BDBA001", ["T01", "T02", "T03", "T04", "T05"]).unwrap();
        assert_eq!(s.id().as_str(), "BBA_BDBA001");
        assert_eq!(s.program(), Program::BbaBdba);
        assert_eq!(s.preference_at(1).unwrap().as_str(), "T01");
        assert_eq!(s.preference_at(5).unwrap().as_str(), "T05");
        assert!(s.preference_at(0).is_none());
        assert!(s.preference_at(6).is_none());
    }

    #[test]
    fn test_rank_of() {
        let s = Student::new("BDBA001", ["T05", "T04", "T03", "T02", "T01"]).unwrap();
        assert_eq!(s.rank_of(&TopicId::from("T05")), Some(1));
        assert_eq!(s.rank_of(&TopicId::from("T01")), Some(5));
        assert_eq!(s.rank_of(&TopicId::from("T99")), None);
    }

    #[test]
    fn test_wrong_preference_count() {
        let err = Student::new("BDBA001", ["T01", "T02", "T03", "T04"]).unwrap_err();
        assert_eq!(
            err,
            MatchError::PreferenceCount {
                student: "BDBA001".to_string(),
                count: 4
            }
        );

        let err = Student::new("BDBA001", ["T1", "T2", "T3", "T4", "T5", "T6"]).unwrap_err();
        assert!(matches!(err, MatchError::PreferenceCount { count: 6, .. }));
    }

    #[test]
    fn test_duplicate_preference() {
        let err = Student::new("BDBA001", ["T01", "T02", "T01", "T04", "T05"]).unwrap_err();
        assert_eq!(
            err,
            MatchError::DuplicatePreference {
                student: "BDBA001".to_string(),
                topic: "T01".to_string()
            }
        );
    }
}

// ============================================================================
// Supervisor Tests
// ============================================================================

mod supervisor_tests {
    use super::*;

    #[test]
    fn test_capacity_bounds() {
        let entry = [(Program::Bdba, "T01", ExpertiseLevel::Expert)];
        assert!(Supervisor::new("S", MIN_CAPACITY, entry.clone()).is_ok());
        assert!(Supervisor::new("S", MAX_CAPACITY, entry.clone()).is_ok());
        assert!(matches!(
            Supervisor::new("S", 0, entry.clone()),
            Err(MatchError::CapacityOutOfRange { capacity: 0, .. })
        ));
        assert!(matches!(
            Supervisor::new("S", 11, entry),
            Err(MatchError::CapacityOutOfRange { capacity: 11, .. })
        ));
    }

    #[test]
    fn test_empty_expertise() {
        let entries: [(Program, &str, ExpertiseLevel); 0] = [];
        assert_eq!(
            Supervisor::new("SUP01", 3, entries).unwrap_err(),
            MatchError::EmptyExpertise {
                supervisor: "SUP01".to_string()
            }
        );
    }

    #[test]
    fn test_topics_are_distinct() {
        let sup = Supervisor::new(
            "SUP01",
            3,
            [
                (Program::Bdba, "T02", ExpertiseLevel::Expert),
                (Program::Bcsai, "T02", ExpertiseLevel::Beginner),
                (Program::Bdba, "T01", ExpertiseLevel::Advanced),
            ],
        )
        .unwrap();
        let topics: Vec<&str> = sup.topics().map(TopicId::as_str).collect();
        assert_eq!(topics, vec!["T01", "T02"]);
    }

    #[test]
    fn test_expertise_level_parsing() {
        assert_eq!("Expert".parse::<ExpertiseLevel>().unwrap(), ExpertiseLevel::Expert);
        assert_eq!(" beginner ".parse::<ExpertiseLevel>().unwrap(), ExpertiseLevel::Beginner);
        assert!("Guru".parse::<ExpertiseLevel>().is_err());
    }
}

// ============================================================================
// Problem Tests
// ============================================================================

mod problem_tests {
    use super::*;

    fn sample() -> Problem {
        Problem::from_entities(
            vec![
                Student::new("BDBA001", ["T01", "T02", "T03", "T04", "T05"]).unwrap(),
                Student::new("BDBA002", ["T02", "T01", "T03", "T04", "T05"]).unwrap(),
                Student::new("BCSAI001", ["T01", "T02", "T03", "T04", "T05"]).unwrap(),
            ],
            vec![
                Topic::new("T01", "Data Science"),
                Topic::new("T02", "Data Science"),
                Topic::new("T03", "Machine Learning"),
            ],
            vec![Supervisor::new(
                "SUP01",
                2,
                [
                    (Program::Bdba, "T01", ExpertiseLevel::Expert),
                    (Program::Bcsai, "T01", ExpertiseLevel::Advanced),
                ],
            )
            .unwrap()],
        )
        .unwrap()
    }

    #[test]
    fn test_students_iterate_in_id_order() {
        let problem = sample();
        let ids: Vec<&str> = problem.students().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, vec!["BCSAI001", "BDBA001", "BDBA002"]);
    }

    #[test]
    fn test_statistics() {
        let stats = sample().statistics();
        assert_eq!(stats.student_count, 3);
        assert_eq!(stats.topic_count, 3);
        assert_eq!(stats.supervisor_count, 1);
        assert_eq!(stats.students_by_program[&Program::Bdba], 2);
        assert_eq!(stats.students_by_program[&Program::Bcsai], 1);
        assert_eq!(stats.topics_by_area["Data Science"], 2);
        assert_eq!(stats.expertise_distribution[&ExpertiseLevel::Expert], 1);
        assert_eq!(stats.total_capacity, 2);
        assert!((stats.demand_ratio - 1.5).abs() < 1e-9);
        assert!(!stats.capacity_sufficient);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = Problem::from_entities(
            vec![
                Student::new("BDBA001", ["T01", "T02", "T03", "T04", "T05"]).unwrap(),
                Student::new("BDBA001", ["T02", "T01", "T03", "T04", "T05"]).unwrap(),
            ],
            vec![],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, MatchError::DuplicateId { kind: "student", .. }));
    }

    #[test]
    fn test_mismatched_map_key_rejected() {
        let mut topics = BTreeMap::new();
        topics.insert(TopicId::from("T99"), Topic::new("T01", "Data Science"));
        let err = Problem::new(BTreeMap::new(), topics, BTreeMap::new()).unwrap_err();
        assert_eq!(
            err,
            MatchError::DuplicateId {
                kind: "topic",
                id: "T99".to_string()
            }
        );
    }

    #[test]
    fn test_empty_problem_statistics() {
        let stats = Problem::default().statistics();
        assert_eq!(stats.student_count, 0);
        assert_eq!(stats.demand_ratio, 0.0);
        assert!(stats.capacity_sufficient);
    }
}
