macro_rules! hash_key {
    ($self:expr, $k:expr) => {{
        let mut hasher = $self.build_hasher.build_hasher();
        $k.hash(&mut hasher);
        hasher.finish()
    }};
}

macro_rules! debug_assert_pow2 {
    ($x:expr) => {{
        debug_assert!($x.is_power_of_two());
    }};
}
