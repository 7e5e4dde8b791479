pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_arg(name, condition)
    }
}

#[inline]
pub fn check_index(index: usize, size: usize) -> Result<()> {
    if index < size {
        Ok(())
    } else {
        out_of_range(index, size)
    }
}

#[inline]
pub fn check_sub_range(from: usize, to: usize, size: usize) -> Result<()> {
    if from <= to && to <= size {
        Ok(())
    } else {
        sub_range_out_of_range(from, to, size)
    }
}

#[cold]
pub fn invalid_arg(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidArgument {
        name: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[cold]
fn out_of_range(index: usize, size: usize) -> Result<()> {
    Err(crate::error::Error::index_out_of_range(index, size))
}

#[cold]
fn sub_range_out_of_range(from: usize, to: usize, size: usize) -> Result<()> {
    Err(crate::error::Error::sub_range_out_of_range(from, to, size))
}
