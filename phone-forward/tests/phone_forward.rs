use std::{cmp::Ordering, collections::BTreeMap};

use phone_forward::{Alphabet, PhoneForward, PhoneNumbers};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use test_log::test;

/// Valid phone number over a few symbols, so that generated rules overlap
#[derive(Debug, Clone, PartialEq, Eq)]
struct Number(String);

impl Arbitrary for Number {
    fn arbitrary(g: &mut Gen) -> Self {
        const SYMBOLS: [char; 5] = ['0', '1', '2', '*', '#'];

        let length = usize::arbitrary(g) % 4 + 1;
        let number = (0..length)
            .map(|_| *g.choose(&SYMBOLS).unwrap_or(&'0'))
            .collect();

        Self(number)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let number = self.0.clone();
        Box::new((1..number.len()).map(move |length| Self(number[..length].to_owned())))
    }
}

#[derive(Debug, Clone)]
enum Operation {
    Add(Number, Number),
    Remove(Number),
}

impl Arbitrary for Operation {
    fn arbitrary(g: &mut Gen) -> Self {
        if u8::arbitrary(g) % 4 == 0 {
            Operation::Remove(Number::arbitrary(g))
        } else {
            Operation::Add(Number::arbitrary(g), Number::arbitrary(g))
        }
    }
}

/// Straightforward map of rules to compare against
#[derive(Debug, Default)]
struct Model {
    rules: BTreeMap<String, String>,
}

impl Model {
    fn apply(&mut self, forward: &mut PhoneForward, operation: &Operation) {
        match operation {
            Operation::Add(Number(source), Number(target)) => {
                let added = forward.add(source, target).is_ok();
                assert_eq!(added, source != target);

                if added {
                    self.rules.insert(source.clone(), target.clone());
                }
            }
            Operation::Remove(Number(prefix)) => {
                forward.remove(prefix);
                self.rules.retain(|source, _| !source.starts_with(prefix.as_str()));
            }
        }
    }

    fn get(&self, number: &str) -> String {
        (1..=number.len())
            .rev()
            .find_map(|length| {
                self.rules
                    .get(&number[..length])
                    .map(|target| format!("{target}{}", &number[length..]))
            })
            .unwrap_or_else(|| number.to_owned())
    }
}

fn get(forward: &PhoneForward, number: &str) -> String {
    let result = forward.get(number).expect("allocation should succeed");
    assert_eq!(result.len(), 1);
    result.get(0).unwrap_or_default().to_owned()
}

fn list(numbers: PhoneNumbers) -> Vec<String> {
    numbers.into_iter().collect()
}

fn is_strictly_sorted(numbers: &PhoneNumbers) -> bool {
    let alphabet = Alphabet::default();
    let numbers = numbers.iter().collect::<Vec<_>>();

    numbers
        .windows(2)
        .all(|pair| alphabet.compare(pair[0], pair[1]) == Ordering::Less)
}

fn build(operations: &[Operation]) -> (PhoneForward, Model) {
    let mut forward = PhoneForward::new();
    let mut model = Model::default();

    for operation in operations {
        model.apply(&mut forward, operation);
    }

    (forward, model)
}

#[test]
fn forwarding_scenario() {
    let mut forward = PhoneForward::new();

    assert!(forward.add("600", "123").is_ok());
    assert_eq!(get(&forward, "600777"), "123777");

    assert!(forward.add("123", "456").is_ok());
    assert_eq!(get(&forward, "123"), "456");
    let reverse = list(forward.reverse("456").unwrap());
    assert!(reverse.contains(&"123".to_owned()));
    assert!(reverse.contains(&"456".to_owned()));

    forward.remove("600");
    assert_eq!(get(&forward, "600777"), "600777");
}

#[test]
fn chained_rules_are_not_followed() {
    let mut forward = PhoneForward::new();

    forward.add("1", "2").unwrap();
    forward.add("2", "3").unwrap();

    assert_eq!(get(&forward, "15"), "25");
    assert_eq!(list(forward.get_reverse("35").unwrap()), vec!["25", "35"]);
    assert_eq!(list(forward.get_reverse("25").unwrap()), vec!["15"]);
}

#[test]
fn long_numbers() {
    let mut forward = PhoneForward::new();
    let source = "1".repeat(1000);
    let target = "#".repeat(500);

    forward.add(&source, &target).unwrap();
    assert_eq!(get(&forward, &format!("{source}*")), format!("{target}*"));
    assert_eq!(
        list(forward.get_reverse(&format!("{target}0")).unwrap()),
        vec![format!("{source}0"), format!("{target}0")]
    );

    forward.remove("1");
    assert_eq!(forward.rule_count(), 0);
}

#[quickcheck]
fn identity_without_rules(number: Number) -> bool {
    let forward = PhoneForward::new();
    let number = number.0;

    get(&forward, &number) == number
        && list(forward.reverse(&number).unwrap()) == vec![number.clone()]
        && list(forward.get_reverse(&number).unwrap()) == vec![number]
}

#[quickcheck]
fn single_rule_rewrites_extensions(source: Number, target: Number, rest: Vec<Number>) -> bool {
    let mut forward = PhoneForward::new();
    let added = forward.add(&source.0, &target.0).is_ok();
    if source == target {
        return !added && forward.rule_count() == 0;
    }

    let suffix = rest.into_iter().map(|number| number.0).collect::<String>();
    added && get(&forward, &format!("{}{suffix}", source.0)) == format!("{}{suffix}", target.0)
}

#[quickcheck]
fn get_agrees_with_model(operations: Vec<Operation>, queries: Vec<Number>) -> bool {
    let (forward, model) = build(&operations);

    let rules = model
        .rules
        .iter()
        .map(|(source, target)| (source.clone(), target.clone()))
        .collect::<Vec<_>>();
    let mut stored = forward.rules();
    stored.sort();

    stored == rules
        && forward.rule_count() == model.rules.len()
        && queries
            .iter()
            .all(|Number(number)| get(&forward, number) == model.get(number))
}

#[quickcheck]
fn get_reverse_is_sound(operations: Vec<Operation>, queries: Vec<Number>) -> bool {
    let (forward, model) = build(&operations);

    queries.iter().all(|Number(number)| {
        let numbers = forward.get_reverse(number).unwrap();

        is_strictly_sorted(&numbers)
            && numbers.iter().all(|found| model.get(found) == *number)
            && numbers.contains(number) == (model.get(number) == *number)
    })
}

#[quickcheck]
fn reverse_contains_every_source(operations: Vec<Operation>) -> bool {
    let (forward, model) = build(&operations);

    model.rules.iter().all(|(source, target)| {
        let numbers = forward.reverse(target).unwrap();

        is_strictly_sorted(&numbers) && numbers.contains(source) && numbers.contains(target)
    })
}

#[quickcheck]
fn get_reverse_finds_every_preimage(operations: Vec<Operation>, numbers: Vec<Number>) -> bool {
    let (forward, model) = build(&operations);

    numbers.iter().all(|Number(number)| {
        let image = model.get(number);
        forward.get_reverse(&image).unwrap().contains(number)
    })
}

#[quickcheck]
fn add_is_idempotent(operations: Vec<Operation>, source: Number, target: Number) -> bool {
    let (mut forward, _) = build(&operations);

    let first = forward.add(&source.0, &target.0).is_ok();
    let rules = forward.rules();
    let reverse = list(forward.reverse(&target.0).unwrap());

    let second = forward.add(&source.0, &target.0).is_ok();

    first == second
        && forward.rules() == rules
        && list(forward.reverse(&target.0).unwrap()) == reverse
}

#[quickcheck]
fn removing_everything_empties_the_store(operations: Vec<Operation>) -> bool {
    let (mut forward, _) = build(&operations);

    for prefix in ["0", "1", "2", "*", "#"] {
        forward.remove(prefix);
    }

    forward.rule_count() == 0
        && ["0", "1*", "#2"]
            .iter()
            .all(|number| list(forward.reverse(number).unwrap()) == vec![number.to_string()])
}
