#![forbid(unsafe_code)]
use brigade::{
    has_minimum_coverage, remaining_quota, sort_staff, CoverageScope, Day, Group, MonthConfig,
    MonthlyConfigs, Presence, Roster, SchedError, Schedule, Shift, ShiftCode, Staff, StaffId,
    YearMonth,
};
use brigade::{JsonStorage, Storage};
use serde_json::json;
use tempfile::tempdir;

fn month() -> YearMonth {
    "2026-02".parse().unwrap()
}

fn day(n: u8) -> Day {
    Day::new(n).unwrap()
}

fn person(id: &str, title: &str) -> Staff {
    Staff {
        id: StaffId::new(id),
        name: id.into(),
        title: title.into(),
        disable_auto: false,
    }
}

#[test]
fn schedule_uses_month_and_day_keys() {
    let mut schedule = Schedule::new();
    schedule.set(month(), &StaffId::new("s1"), day(3), Shift::manual(ShiftCode::Morning));
    schedule.set(month(), &StaffId::new("s1"), day(12), Shift::auto(ShiftCode::National));

    let value = serde_json::to_value(&schedule).unwrap();
    assert_eq!(
        value,
        json!({
            "2026-02": {
                "s1": {
                    "03": { "value": "早", "isManual": true },
                    "12": { "value": "國", "isManual": false }
                }
            }
        })
    );

    let back: Schedule = serde_json::from_value(value).unwrap();
    assert_eq!(back, schedule);
}

#[test]
fn staff_group_and_holiday_field_names() {
    let raw = json!({
        "staff": [{ "id": "s1", "name": "Ana", "title": "Chef", "disableAuto": true }],
        "groups": [{ "id": "g1", "name": "Chaud", "memberIds": ["s1"], "minStaffCount": 1 }],
        "holidays": [{ "date": "2026-01-01", "name": "Nouvel an", "isOff": "2", "type": "NATIONAL" }],
        "monthlyConfigs": { "2026-01": { "regular": 8, "leave": 2, "national": 1 } }
    });
    let roster: Roster = serde_json::from_value(raw).unwrap();

    assert!(roster.staff[0].disable_auto);
    assert_eq!(roster.groups[0].member_ids, vec![StaffId::new("s1")]);
    assert!(roster.holidays[0].is_day_off());
    let jan: YearMonth = "2026-01".parse().unwrap();
    assert_eq!(
        roster.monthly_configs.get(jan),
        Some(&MonthConfig { regular: 8, leave: 2, national: 1 })
    );
}

#[test]
fn shift_code_parsing() {
    assert_eq!("例".parse::<ShiftCode>().unwrap(), ShiftCode::Regular);
    assert_eq!("".parse::<ShiftCode>().unwrap(), ShiftCode::Empty);
    assert!(matches!(
        "X".parse::<ShiftCode>(),
        Err(SchedError::InvalidShiftCode(_))
    ));
    assert!(ShiftCode::National.is_leave());
    assert!(!ShiftCode::FullDay.is_leave());
}

#[test]
fn remaining_quota_only_subtracts_manual_leave() {
    let id = StaffId::new("s1");
    let mut schedule = Schedule::new();
    schedule.set(month(), &id, day(1), Shift::manual(ShiftCode::Personal));
    schedule.set(month(), &id, day(2), Shift::manual(ShiftCode::Personal));
    schedule.set(month(), &id, day(3), Shift::manual(ShiftCode::Personal));
    schedule.set(month(), &id, day(4), Shift::auto(ShiftCode::Regular));
    schedule.set(month(), &id, day(5), Shift::manual(ShiftCode::Morning));

    let quota = remaining_quota(
        &id,
        month(),
        &schedule,
        &MonthConfig { regular: 4, leave: 2, national: 1 },
    );
    assert_eq!(quota.regular, 4);
    assert_eq!(quota.leave, -1);
    assert_eq!(quota.national, 1);
    assert!(!quota.has(brigade::LeaveKind::Personal));
}

#[test]
fn group_coverage_excludes_the_candidate() {
    let group = Group {
        id: "g".into(),
        name: "Chaud".into(),
        member_ids: vec![StaffId::new("a"), StaffId::new("b"), StaffId::new("c")],
        min_staff_count: 2,
    };
    let mut schedule = Schedule::new();
    schedule.set(month(), &StaffId::new("a"), day(9), Shift::manual(ShiftCode::Morning));
    schedule.set(month(), &StaffId::new("b"), day(9), Shift::manual(ShiftCode::Evening));
    schedule.set(month(), &StaffId::new("c"), day(9), Shift::manual(ShiftCode::National));

    let check = |exclude: &str, presence| {
        has_minimum_coverage(
            &schedule,
            month(),
            day(9),
            Some(&StaffId::new(exclude)),
            CoverageScope::Group(&group),
            presence,
        )
    };
    assert!(check("c", Presence::Rostered));
    assert!(!check("a", Presence::Rostered));
    // 國 est un congé pour la couverture de groupe, même en mode « disponible »
    assert!(!check("a", Presence::Available));

    // case vide : absente en mode strict, disponible sinon
    assert!(!has_minimum_coverage(
        &schedule,
        month(),
        day(10),
        None,
        CoverageScope::Group(&group),
        Presence::Rostered,
    ));
    assert!(has_minimum_coverage(
        &schedule,
        month(),
        day(10),
        None,
        CoverageScope::Group(&group),
        Presence::Available,
    ));
}

#[test]
fn zero_floor_and_ungrouped_always_pass() {
    let group = Group {
        id: "g".into(),
        name: "Plonge".into(),
        member_ids: vec![StaffId::new("a")],
        min_staff_count: 0,
    };
    let schedule = Schedule::new();
    assert!(has_minimum_coverage(
        &schedule,
        month(),
        day(1),
        Some(&StaffId::new("a")),
        CoverageScope::Group(&group),
        Presence::Rostered,
    ));
    assert!(has_minimum_coverage(
        &schedule,
        month(),
        day(1),
        None,
        CoverageScope::Ungrouped,
        Presence::Rostered,
    ));
}

#[test]
fn roster_scope_needs_two_and_a_senior() {
    let staff = vec![person("chef", "Chef"), person("cdp", "CDP"), person("pt", "PT")];
    let mut schedule = Schedule::new();
    schedule.set(month(), &staff[1].id, day(2), Shift::manual(ShiftCode::Morning));
    schedule.set(month(), &staff[2].id, day(2), Shift::manual(ShiftCode::Morning));
    let covered = |schedule: &Schedule| {
        has_minimum_coverage(
            schedule,
            month(),
            day(2),
            None,
            CoverageScope::Roster(&staff),
            Presence::HolidayDuty,
        )
    };
    assert!(!covered(&schedule));
    schedule.set(month(), &staff[0].id, day(2), Shift::manual(ShiftCode::FullDay));
    assert!(covered(&schedule));
}

#[test]
fn new_staff_gets_a_fresh_id() {
    let a = Staff::new("Ana", "Chef");
    let b = Staff::new("Ana", "Chef");
    assert_ne!(a.id, b.id);
    assert!(!a.disable_auto);
    assert!(a.is_senior());
}

#[test]
fn staff_sorted_by_rank_then_id() {
    let staff = vec![
        person("z", "Commis"),
        person("b", "Stagiaire"),
        person("y", "Chef"),
        person("a", "Commis"),
        person("x", "Sous chef"),
    ];
    let sorted = sort_staff(&staff);
    let order: Vec<&str> = sorted.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(order, vec!["y", "x", "a", "z", "b"]);
}

#[test]
fn copy_previous_month_config() {
    let mut configs = MonthlyConfigs::default();
    let jan: YearMonth = "2026-01".parse().unwrap();
    let feb = month();
    configs.set(jan, MonthConfig { regular: 9, leave: 1, national: 2 });

    let copied = configs.copy_previous(feb).unwrap();
    assert_eq!(copied.total_days(), 12);
    assert_eq!(configs.for_month(feb), copied);

    let april: YearMonth = "2026-04".parse().unwrap();
    assert!(matches!(
        configs.copy_previous(april),
        Err(SchedError::MissingConfig(m)) if m == "2026-03"
    ));
    assert_eq!(configs.for_month(april), MonthConfig::default());
}

#[test]
fn removing_staff_prunes_every_month() {
    let mut roster = Roster {
        staff: vec![person("a", "CDP"), person("b", "CDP")],
        groups: vec![Group {
            id: "g".into(),
            name: "Chaud".into(),
            member_ids: vec![StaffId::new("a"), StaffId::new("b")],
            min_staff_count: 1,
        }],
        ..Roster::default()
    };
    let jan: YearMonth = "2026-01".parse().unwrap();
    for m in [jan, month()] {
        roster.schedule.set(m, &StaffId::new("a"), day(1), Shift::manual(ShiftCode::Morning));
        roster.schedule.set(m, &StaffId::new("b"), day(1), Shift::manual(ShiftCode::Morning));
    }

    assert!(roster.remove_staff(&StaffId::new("a")).is_some());
    assert!(roster.find_staff(&StaffId::new("a")).is_none());
    assert_eq!(roster.groups[0].member_ids, vec![StaffId::new("b")]);
    for m in [jan, month()] {
        assert!(roster.schedule.staff_month(m, &StaffId::new("a")).is_none());
        assert!(roster.schedule.staff_month(m, &StaffId::new("b")).is_some());
    }
    assert!(roster.remove_staff(&StaffId::new("a")).is_none());
}

#[test]
fn json_storage_saves_atomically_and_reloads() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("roster.json")).unwrap();
    assert!(storage.load_or_default().unwrap().staff.is_empty());
    assert!(storage.load().is_err());

    let mut roster = Roster {
        staff: vec![person("a", "Chef")],
        ..Roster::default()
    };
    roster.schedule.set(month(), &StaffId::new("a"), day(28), Shift::auto(ShiftCode::Regular));
    storage.save(&roster).unwrap();

    let back = storage.load().unwrap();
    assert_eq!(back.staff, roster.staff);
    assert_eq!(back.schedule, roster.schedule);
    let raw = std::fs::read_to_string(dir.path().join("roster.json")).unwrap();
    assert!(raw.ends_with("}\n"));

    std::fs::write(dir.path().join("roster.json"), "{ pas du json").unwrap();
    let err = storage.load_or_default().unwrap_err();
    assert!(format!("{err:#}").contains("invalid roster"));
}
