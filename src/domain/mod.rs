pub mod property;

pub use property::PropertyRecord;

#[cfg(test)]
pub(crate) use property::sample_record;
