use std::ops::{BitAnd, Shl};

use num_traits::Unsigned;

use crate::signal::Signal;

pub fn encode<T>(val: T, bits: usize) -> Vec<Signal>
where
    T: Unsigned + Copy + BitAnd<T, Output = T> + Shl<usize, Output = T>,
{
    (0..bits)
        .map(|bit| Signal::from(!(val & (T::one() << bit)).is_zero()))
        .collect()
}

pub fn decode<T>(signals: &[Signal]) -> Option<T>
where
    T: Unsigned + Shl<usize, Output = T>,
{
    let mut sum = T::zero();
    for (bit, signal) in signals.iter().enumerate() {
        if signal.to_bool()? {
            sum = sum + (T::one() << bit);
        }
    }
    Some(sum)
}
