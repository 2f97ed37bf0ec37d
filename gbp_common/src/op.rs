/// Implements a std::ops trait for a single-field newtype by delegating to the inner value.
#[macro_export]
macro_rules! op {
    (binary $for_struct:ident, $impl_trait:ident, $impl_fn:ident) => {
        impl $impl_trait for $for_struct {
            type Output = Self;

            fn $impl_fn(self, rhs: Self) -> Self::Output {
                Self::from(self.0.$impl_fn(rhs.0))
            }
        }
    };

    // `$binary_fn` is the plain operator the assignment delegates to, e.g. `add` for `add_assign`.
    (inplace $for_struct:ident, $impl_trait:ident, $impl_fn:ident, $binary_fn:ident) => {
        impl $impl_trait for $for_struct {
            fn $impl_fn(&mut self, rhs: Self) {
                *self = Self::from(self.0.$binary_fn(rhs.0))
            }
        }
    };
}
