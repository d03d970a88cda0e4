use serde::{Deserialize, Serialize};

/// How samples outside a signal or raster are synthesized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderMode<T> {
    Clamp,
    Constant(T),
    Reflect101,
}

impl<T> Default for BorderMode<T> {
    fn default() -> Self {
        Self::Clamp
    }
}

pub fn map_index<T>(i: isize, len: usize, mode: &BorderMode<T>) -> Option<usize> {
    if len == 0 {
        return None;
    }

    match mode {
        BorderMode::Constant(_) => {
            if i < 0 || i as usize >= len {
                None
            } else {
                Some(i as usize)
            }
        }
        BorderMode::Clamp => {
            if i < 0 {
                Some(0)
            } else {
                Some((i as usize).min(len - 1))
            }
        }
        BorderMode::Reflect101 => {
            if len == 1 {
                return Some(0);
            }

            let period = (2 * len - 2) as isize;
            let r = i.rem_euclid(period) as usize;
            if r < len {
                Some(r)
            } else {
                Some((2 * len - 2) - r)
            }
        }
    }
}

/// Reads `signal[i]`, resolving out-of-range indices through `mode`.
#[inline]
pub fn fetch<T: Copy>(signal: &[T], i: isize, mode: &BorderMode<T>) -> Option<T> {
    match map_index(i, signal.len(), mode) {
        Some(idx) => Some(signal[idx]),
        None => match mode {
            BorderMode::Constant(c) if !signal.is_empty() => Some(*c),
            _ => None,
        },
    }
}
