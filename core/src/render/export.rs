use crate::contracts::model::Contract;
use crate::error::CoreResult;

/// CSV of the current view, in view order.
pub fn render_view_csv(view: &[&Contract]) -> CoreResult<String> {
    let mut wtr = csv::WriterBuilder::new().from_writer(vec![]);
    wtr.write_record([
        "contract_number",
        "vendor",
        "term",
        "start_year",
        "end_year",
        "total_value_clean",
        "contract_category",
        "red_flags",
    ])?;
    for c in view {
        wtr.write_record([
            c.contract_number.clone(),
            c.vendor.clone(),
            c.term.clone(),
            opt_to_string(c.start_year),
            opt_to_string(c.end_year),
            opt_to_string(c.total_value_clean),
            c.contract_category.clone(),
            c.flags().join("; "),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).replace("\r\n", "\n"))
}

fn opt_to_string<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}
