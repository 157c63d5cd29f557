#[cfg(test)]
#[ctor::ctor]
fn init_backtrace() {
    color_backtrace::install();
}

pub trait SliceMath<T>
where
    T: PartialOrd + Copy,
{
    fn argmin(&self) -> Option<usize>;
}

impl<T> SliceMath<T> for [T]
where
    T: PartialOrd + Copy,
{
    /// Returns the index of the smallest element,
    /// preferring the lowest index among ties.
    fn argmin(&self) -> Option<usize> {
        let mut min = *self.first()?;
        let mut argmin: usize = 0;

        for (idx, &item) in self.iter().enumerate().skip(1) {
            if item < min {
                min = item;
                argmin = idx;
            }
        }

        Some(argmin)
    }
}
