use crate::domain::payment::Payment;
use crate::error::Result;
use std::io::Write;

/// Writes the final payment states as CSV:
/// `payment,total,captured,status,active`.
pub struct PaymentWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PaymentWriter<W> {
    pub fn new(target: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(target),
        }
    }

    pub fn write_payments(&mut self, mut payments: Vec<Payment>) -> Result<()> {
        payments.sort_by_key(|p| p.id);
        self.writer
            .write_record(["payment", "total", "captured", "status", "active"])?;
        for payment in payments {
            self.writer.write_record([
                payment.id.to_string(),
                payment.total.to_string(),
                payment.captured_amount.to_string(),
                payment.charge_status.to_string(),
                payment.is_active.to_string(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
