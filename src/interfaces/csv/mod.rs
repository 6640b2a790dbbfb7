pub mod operation_reader;
pub mod payment_writer;
