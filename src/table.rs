/// Body rows for the software table. The first line is the header and is
/// skipped; each remaining non-empty line becomes one row with its
/// tab-separated cells copied verbatim.
pub fn render_table_rows(tsv: &str) -> String {
    let mut out = String::from("<tbody>");
    for line in tsv.lines().skip(1) {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        out.push_str("<tr><td>");
        out.push_str(&line.replace('\t', "</td><td>"));
        out.push_str("</td></tr>");
    }
    out.push_str("</tbody>");
    out
}
