//! Local fun-fact generation
//!
//! The fact menu is a fixed list of templates evaluated against a number.
//! Selection goes through a [`Picker`] so callers decide where randomness comes
//! from; the shell uses a thread-local RNG, tests use a fixed index.

use crate::primitives::{self, Factorial};

/// Elements whose atomic number the local menu knows about, starting at 4
const ELEMENTS: [&str; 7] = [
    "Beryllium",
    "Boron",
    "Carbon",
    "Nitrogen",
    "Oxygen",
    "Fluorine",
    "Neon",
];

const FIRST_ATOMIC_NUMBER: i64 = 4;

/// Source of "pick one of N" decisions
pub trait Picker {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}

/// Always picks the same index, wrapped into range
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPicker(pub usize);

impl Picker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        self.0 % len
    }
}

/// Element name for an atomic number, if the local table knows it
pub fn element_name(n: i64) -> Option<&'static str> {
    let index = n.checked_sub(FIRST_ATOMIC_NUMBER)?;
    usize::try_from(index)
        .ok()
        .and_then(|index| ELEMENTS.get(index).copied())
}

/// Every local fact candidate for `n`, in menu order
pub fn local_facts(n: i64) -> Vec<String> {
    let magnitude = n.unsigned_abs();

    let parity = if primitives::is_even(n) {
        "an even"
    } else {
        "an odd"
    };
    let prime = if primitives::is_prime(n) {
        "a prime"
    } else {
        "not a prime"
    };
    let fibonacci = if primitives::is_fibonacci(n) {
        "a Fibonacci"
    } else {
        "not a Fibonacci"
    };
    let square = i128::from(n) * i128::from(n);
    let factorial = match primitives::factorial(n) {
        Ok(Factorial::Exact(value)) => format!("The factorial of {n} is {value}."),
        Ok(_) => format!("The factorial of {n} is too large to calculate."),
        Err(_) => format!("The factorial of {n} is undefined."),
    };
    let perfect_square = if primitives::is_perfect_square(n) {
        "is"
    } else {
        "is not"
    };
    let perfect_cube = if primitives::is_perfect_cube(n) {
        "is"
    } else {
        "is not"
    };
    let element = match element_name(n) {
        Some(name) => format!("{n} is the atomic number of {name}."),
        None => format!("{n} is the atomic number of an unknown element."),
    };

    vec![
        format!("{n} is {parity} number."),
        format!("{n} is {prime} number."),
        format!("{n} is {fibonacci} number."),
        format!("The square of {n} is {square}."),
        format!(
            "The binary representation of {magnitude} is {}.",
            primitives::binary_digits(n)
        ),
        format!(
            "The hexadecimal representation of {magnitude} is {}.",
            primitives::hex_digits(n)
        ),
        factorial,
        format!("{n} {perfect_square} a perfect square."),
        format!("{n} {perfect_cube} a perfect cube."),
        element,
    ]
}

/// Pick one local fact for `n`
pub fn pick_local_fact(n: i64, picker: &dyn Picker) -> String {
    let mut facts = local_facts(n);
    let index = picker.pick(facts.len()) % facts.len();
    facts.swap_remove(index)
}
