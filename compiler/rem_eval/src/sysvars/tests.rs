use pretty_assertions::assert_eq;

use super::*;

#[test]
fn table_is_sorted() {
    assert!(crate::table::is_sorted(SYSTEM_VARIABLES));
}

#[test]
fn lookup_ignores_case() {
    assert_eq!(find_sysvar("formwidth").map(|v| v.name), Some("FormWidth"));
    assert!(find_sysvar("NoSuchThing").is_none());
}

// === Stored entries ===

#[test]
fn stored_entries_start_at_their_defaults() {
    let vars = SystemVariables::new();
    let host = HostState::default();
    assert_eq!(vars.get(&host, "DefaultPrio"), Ok(Value::Int(5000)));
    assert_eq!(vars.get(&host, "Location"), Ok(Value::string("Ottawa")));
    assert_eq!(vars.get(&host, "numtrig"), Ok(Value::Int(0)));
}

#[test]
fn set_checks_bounds() {
    let mut vars = SystemVariables::new();
    let mut host = HostState::default();
    assert_eq!(vars.set(&mut host, "FormWidth", Value::Int(19)), Err(EvalError::TooLow));
    assert_eq!(vars.set(&mut host, "FormWidth", Value::Int(133)), Err(EvalError::TooHigh));
    vars.set(&mut host, "FormWidth", Value::Int(80)).unwrap();
    assert_eq!(vars.get(&host, "FormWidth"), Ok(Value::Int(80)));
}

#[test]
fn unbounded_maximum() {
    let mut vars = SystemVariables::new();
    let mut host = HostState::default();
    vars.set(&mut host, "MaxSatIter", Value::Int(1_000_000)).unwrap();
    assert_eq!(vars.set(&mut host, "MaxSatIter", Value::Int(9)), Err(EvalError::TooLow));
}

#[test]
fn set_check_order() {
    let mut vars = SystemVariables::new();
    let mut host = HostState::default();
    assert_eq!(
        vars.set(&mut host, "Bogus", Value::Int(1)),
        Err(EvalError::NoSuchVariable("Bogus".into()))
    );
    // type is checked before modifiability
    assert_eq!(vars.set(&mut host, "NumTrig", Value::string("x")), Err(EvalError::BadType));
    assert_eq!(
        vars.set(&mut host, "NumTrig", Value::Int(3)),
        Err(EvalError::CantModify("NumTrig".into()))
    );
}

#[test]
fn strings_are_replaced() {
    let mut vars = SystemVariables::new();
    let mut host = HostState::default();
    vars.set(&mut host, "Location", Value::string("Paris")).unwrap();
    assert_eq!(vars.get(&host, "location"), Ok(Value::string("Paris")));
}

#[test]
fn host_set_ignores_modifiability() {
    let mut vars = SystemVariables::new();
    let host = HostState::default();
    vars.host_set("NumTrig", Value::Int(4)).unwrap();
    assert_eq!(vars.get(&host, "NumTrig"), Ok(Value::Int(4)));
    assert_eq!(vars.host_set("U", Value::Date(1)), Err(EvalError::CantModify("U".into())));
}

// === Special entries ===

#[test]
fn today_views() {
    let vars = SystemVariables::new();
    let host = HostState {
        // 2024-01-01, a Monday
        today: 12418,
        ..HostState::default()
    };
    assert_eq!(vars.get(&host, "U"), Ok(Value::Date(12418)));
    assert_eq!(vars.get(&host, "Uy"), Ok(Value::Int(2024)));
    assert_eq!(vars.get(&host, "Um"), Ok(Value::Int(1)));
    assert_eq!(vars.get(&host, "Ud"), Ok(Value::Int(1)));
    assert_eq!(vars.get(&host, "Uw"), Ok(Value::Int(1)));
}

#[test]
fn trigger_views() {
    let vars = SystemVariables::new();
    let mut host = HostState::default();
    host.trigger.date = 12418 + 6;
    assert_eq!(vars.get(&host, "T"), Ok(Value::Date(12424)));
    assert_eq!(vars.get(&host, "Td"), Ok(Value::Int(7)));
    assert_eq!(vars.get(&host, "Tw"), Ok(Value::Int(0)));
}

#[test]
fn run_off_follows_host() {
    let mut vars = SystemVariables::new();
    let mut host = HostState::default();
    assert_eq!(vars.get(&host, "RunOff"), Ok(Value::Int(0)));
    host.run_disabled = true;
    assert_eq!(vars.get(&host, "runoff"), Ok(Value::Int(1)));
    assert_eq!(
        vars.set(&mut host, "RunOff", Value::Int(0)),
        Err(EvalError::CantModify("RunOff".into()))
    );
    assert!(host.run_disabled);
}

#[test]
fn views_are_read_only() {
    let mut vars = SystemVariables::new();
    let mut host = HostState::default();
    assert_eq!(
        vars.set(&mut host, "U", Value::Date(5)),
        Err(EvalError::CantModify("U".into()))
    );
}

#[test]
fn separators_write_through() {
    let mut vars = SystemVariables::new();
    let mut host = HostState::default();
    vars.set(&mut host, "DateSep", Value::string("-")).unwrap();
    vars.set(&mut host, "TimeSep", Value::string(".")).unwrap();
    assert_eq!(host.separators.date, '-');
    assert_eq!(host.separators.time, '.');
    assert_eq!(vars.get(&host, "DateSep"), Ok(Value::string("-")));
    assert_eq!(
        vars.set(&mut host, "DateSep", Value::string(":")),
        Err(EvalError::BadType)
    );
    assert_eq!(
        vars.set(&mut host, "TimeSep", Value::string("::")),
        Err(EvalError::BadType)
    );
}

#[test]
fn max_string_len_writes_through() {
    let mut vars = SystemVariables::new();
    let mut host = HostState::default();
    vars.set(&mut host, "MaxStringLen", Value::Int(-1)).unwrap();
    assert_eq!(host.max_string_len, -1);
    assert_eq!(
        vars.set(&mut host, "MaxStringLen", Value::Int(-2)),
        Err(EvalError::TooLow)
    );
}

#[test]
fn dump_lists_every_entry() {
    let vars = SystemVariables::new();
    let lines = vars.dump_lines(&HostState::default());
    assert_eq!(lines.len(), SYSTEM_VARIABLES.len());
    let form_width = lines.iter().find(|l| l.contains("$FormWidth")).unwrap();
    assert!(form_width.ends_with("[20, 132]"), "{form_width}");
    let sat = lines.iter().find(|l| l.contains("$MaxSatIter")).unwrap();
    assert!(sat.ends_with("[10, Inf)"), "{sat}");
    let location = lines.iter().find(|l| l.contains("$Location")).unwrap();
    assert!(location.ends_with("\"Ottawa\""), "{location}");
}
