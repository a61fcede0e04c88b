use core::{cmp::Ordering, fmt};

use panf_mem::{ArrayError, Doubling, DynamicArray};

#[derive(Clone, PartialEq, Eq, Debug)]
struct Car {
    brand: &'static str,
    model: &'static str,
    horse_power: u32,
}

impl Car {

    fn new(brand: &'static str, model: &'static str, horse_power: u32) -> Self {
        Self { brand, model, horse_power }
    }
}

impl Ord for Car {

    fn cmp(&self, other: &Self) -> Ordering {
        self.brand.cmp(other.brand)
            .then_with(|| self.model.cmp(other.model))
            .then_with(|| self.horse_power.cmp(&other.horse_power))
    }
}

impl PartialOrd for Car {

    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Car {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}, {} hp", self.brand, self.model, self.horse_power)
    }
}

#[test]
fn sorts_integers() {
    let mut array = DynamicArray::new();
    for value in [5, 4, 1, 8, 9, 3, 7, 2, 6] {
        array.append(value);
    }
    assert_eq!(array.to_string(), "[5, 4, 1, 8, 9, 3, 7, 2, 6]");
    array.sort();
    assert_eq!(array.to_string(), "[1, 2, 3, 4, 5, 6, 7, 8, 9]");
}

#[test]
fn sorts_strings() {
    let mut array = DynamicArray::new();
    for value in ["One", "Two", "Box", "Cat"] {
        array.append(value.to_string());
    }
    array.sort();
    assert_eq!(array.to_string(), "[Box, Cat, One, Two]");
}

#[test]
fn sorts_records_by_every_field() {
    let mut array = DynamicArray::new();
    array.append(Car::new("Mercedes", "S", 300));
    array.append(Car::new("Audi", "A6", 250));
    array.append(Car::new("Audi", "A4", 250));
    array.append(Car::new("Mercedes", "S", 220));
    array.append(Car::new("BMW", "M3", 430));
    array.sort();
    assert_eq!(
        array.to_string(),
        "[Audi A4, 250 hp, Audi A6, 250 hp, BMW M3, 430 hp, Mercedes S, 220 hp, Mercedes S, 300 hp]",
    );
    assert_eq!(array.get(1).unwrap(), &Car::new("Audi", "A6", 250));
}

#[test]
fn sorting_trivial_arrays_is_a_no_op() {
    let mut empty: DynamicArray<i32> = DynamicArray::new();
    empty.sort();
    assert!(empty.is_empty());

    let mut single = DynamicArray::new();
    single.append('z');
    single.sort();
    assert_eq!(single, ['z']);
}

#[test]
fn sort_keeps_duplicates() {
    let mut array: DynamicArray<u8, Doubling> = [3, 1, 3, 2, 1, 3].into_iter().collect();
    array.sort();
    assert_eq!(array, [1, 1, 2, 3, 3, 3]);
    assert_eq!(array.len(), 6);
}

#[test]
fn sort_after_growth_and_removal_ignores_free_slots() {
    let mut array = DynamicArray::new();
    for value in (0..25).rev() {
        array.append(value);
    }
    array.remove_at(0).unwrap();
    array.remove_at(0).unwrap();
    array.sort();
    let expected: Vec<i32> = (0..23).collect();
    assert_eq!(array, expected[..]);
}

#[test]
fn try_sort_orders_floats() {
    let mut array: DynamicArray<f64> = [2.5, -1.0, 0.0, 10.25, 3.0].into_iter().collect();
    array.try_sort().unwrap();
    assert_eq!(array, [-1.0, 0.0, 2.5, 3.0, 10.25]);
}

#[test]
fn try_sort_reports_incomparable_elements_and_keeps_order() {
    let mut array: DynamicArray<f64> = [3.0, f64::NAN, 1.0, 2.0].into_iter().collect();
    let err = array.try_sort().unwrap_err();
    match err {
        ArrayError::Incomparable { left, right } => {
            assert_ne!(left, right);
            assert!(left == 1 || right == 1, "NaN not named in {err}");
        },
        other => panic!("unexpected error {other}"),
    }
    assert_eq!(array.get(0), Ok(&3.0));
    assert!(array.get(1).unwrap().is_nan());
    assert_eq!(array.get(2), Ok(&1.0));
    assert_eq!(array.get(3), Ok(&2.0));
}
