pub(crate) mod me;
