/// Primitive numeric cube element that can be read as an `f64` intensity.
pub trait Sample: Copy {
    fn to_f64(self) -> f64;
}

macro_rules! impl_sample {
    ($($ty:ty),*) => {
        $(
            impl Sample for $ty {
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_sample!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

pub struct StatsHelper;

impl StatsHelper {
    /// `count` evenly spaced values from `start` to `end`, both inclusive.
    pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (end - start) / (count - 1) as f64;
                (0..count)
                    .map(|i| if i == count - 1 { end } else { start + step * i as f64 })
                    .collect()
            }
        }
    }

    /// Smallest and largest value, or `None` for an empty slice.
    pub fn extrema(samples: &[u8]) -> Option<(u8, u8)> {
        samples.iter().fold(None, |acc, &value| match acc {
            None => Some((value, value)),
            Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
        })
    }

    /// Truncates toward zero and saturates into the 8-bit intensity range.
    /// NaN maps to zero.
    pub fn to_intensity(value: f64) -> u8 {
        value as u8
    }
}
