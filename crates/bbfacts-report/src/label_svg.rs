//! Broadband Facts label rendering.
//!
//! A label is drawn top to bottom in one pass. The document is written into
//! memory with placeholder heights; once the last section is placed the
//! placeholders in the document header are replaced by the final cursor.

use anyhow::{Context, Result};
use tracing::trace;

use bbfacts_model::{AdditionalCharge, LabelOptions, LabelRecord};

use crate::canvas::SvgCanvas;
use crate::common::{
    ACP_URL, BORDER_HEIGHT_PLACEHOLDER, BORDER_INSET, FCC_CONSUMER_URL, FEE_INDENT,
    HEIGHT_PLACEHOLDER, INDENT, LABEL_WIDTH, LEFT, RIGHT, STYLE_COMPANY, STYLE_FCC_LINK,
    STYLE_HEADING, STYLE_NORMAL, STYLE_NORMAL_BOLD, STYLE_NORMAL_BOLD_END,
    STYLE_NORMAL_HEAVY_END, STYLE_PLAN, STYLE_PLAN_ID, STYLE_PRICE, STYLE_PRICE_VALUE,
    STYLE_SMALL, STYLE_SMALL_BOLD_END, STYLE_TITLE, STYLESHEET, SVG_NS, XLINK_NS,
    contract_article, unique_plan_identifier,
};
use crate::layout::LayoutCursor;

/// A finished SVG document and its declared height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLabel {
    pub svg: Vec<u8>,
    pub height: u32,
}

/// Render one label.
pub fn render_label(record: &LabelRecord, options: &LabelOptions) -> Result<RenderedLabel> {
    let mut painter = LabelPainter {
        canvas: SvgCanvas::new(),
        cursor: LayoutCursor::new(),
        record,
    };
    let body_start = painter.open_document()?;
    painter.title(&options.title)?;
    painter.provider()?;
    painter.monthly_price()?;
    painter.monthly_details()?;
    painter.additional_charges()?;
    painter.discounts_and_bundles()?;
    painter.acp()?;
    painter.speeds()?;
    painter.data_allowance()?;
    painter.policies()?;
    painter.customer_support()?;
    painter.fcc_footer()?;
    painter.plan_identifier()?;
    painter.close_document()?;

    let height = painter.cursor.y();
    let svg = substitute_heights(painter.canvas.into_bytes(), body_start, height)
        .with_context(|| format!("finalize label for row {}", record.row))?;
    trace!(row = record.row, height, bytes = svg.len(), "rendered label");
    Ok(RenderedLabel { svg, height })
}

/// Replace the height placeholders, which only occur before `body_start`.
fn substitute_heights(bytes: Vec<u8>, body_start: usize, height: u32) -> Result<Vec<u8>> {
    let (head, body) = bytes.split_at(body_start);
    let head = std::str::from_utf8(head).context("label header is not UTF-8")?;
    let border = height.saturating_sub(2 * BORDER_INSET);
    let mut svg = head
        .replace(HEIGHT_PLACEHOLDER, &height.to_string())
        .replace(BORDER_HEIGHT_PLACEHOLDER, &border.to_string())
        .into_bytes();
    svg.extend_from_slice(body);
    Ok(svg)
}

struct LabelPainter<'a> {
    canvas: SvgCanvas,
    cursor: LayoutCursor,
    record: &'a LabelRecord,
}

impl LabelPainter<'_> {
    /// Write the root element, styles and background. Returns the offset
    /// where section content begins.
    fn open_document(&mut self) -> Result<usize> {
        let width = LABEL_WIDTH.to_string();
        let view_box = format!("0 0 {LABEL_WIDTH} {HEIGHT_PLACEHOLDER}");
        let canvas = &mut self.canvas;
        canvas.declaration()?;
        canvas.start(
            "svg",
            &[
                ("xmlns", SVG_NS),
                ("xmlns:xlink", XLINK_NS),
                ("id", "bcd"),
                ("width", width.as_str()),
                ("height", HEIGHT_PLACEHOLDER),
                ("viewBox", view_box.as_str()),
            ],
        )?;
        canvas.start("g", &[("id", "content-group")])?;
        canvas.stylesheet(STYLESHEET)?;
        canvas.empty(
            "rect",
            &[
                ("x", "0"),
                ("y", "0"),
                ("width", width.as_str()),
                ("height", HEIGHT_PLACEHOLDER),
                ("style", "fill:white"),
            ],
        )?;
        let inset = BORDER_INSET.to_string();
        let border_width = (LABEL_WIDTH - 2 * BORDER_INSET).to_string();
        canvas.empty(
            "rect",
            &[
                ("x", inset.as_str()),
                ("y", inset.as_str()),
                ("width", border_width.as_str()),
                ("height", BORDER_HEIGHT_PLACEHOLDER),
                ("style", "fill:none;stroke:black;stroke-width:3"),
            ],
        )?;
        Ok(canvas.position())
    }

    fn close_document(&mut self) -> Result<()> {
        self.canvas.end("g")?;
        self.canvas.end("svg")
    }

    fn line(&mut self, x: u32, offset: u32, content: &str, style: &str) -> Result<u32> {
        let y = self.cursor.advance(offset);
        self.canvas.text(x, y, content, style)?;
        Ok(y)
    }

    /// Text at the right edge on the current line.
    fn value(&mut self, content: &str, style: &str) -> Result<()> {
        let y = self.cursor.y();
        self.canvas.text(RIGHT, y, content, style)
    }

    fn separator(&mut self, offset: u32, stroke_width: u32) -> Result<()> {
        let y = self.cursor.advance(offset);
        self.canvas.separator(y, stroke_width)
    }

    fn section<F>(&mut self, draw: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.canvas.start("g", &[])?;
        draw(self)?;
        self.canvas.end("g")
    }

    fn title(&mut self, title: &str) -> Result<()> {
        self.section(|p| {
            p.line(LABEL_WIDTH / 2, 65, title, STYLE_TITLE)?;
            p.separator(10, 1)
        })
    }

    fn provider(&mut self) -> Result<()> {
        let record = self.record;
        self.section(|p| {
            p.line(LEFT, 30, &record.company_name, STYLE_COMPANY)?;
            p.line(LEFT, 30, &record.plan_name, STYLE_PLAN)?;
            p.line(LEFT, 30, record.service_type.disclosure_title(), STYLE_NORMAL)?;
            p.separator(10, 12)
        })
    }

    fn monthly_price(&mut self) -> Result<()> {
        let price = format!("${}", self.record.monthly_price);
        self.section(|p| {
            p.line(LEFT, 30, "Monthly Price", STYLE_PRICE)?;
            p.value(&price, STYLE_PRICE_VALUE)?;
            p.separator(10, 3)
        })
    }

    fn monthly_details(&mut self) -> Result<()> {
        let record = self.record;
        self.section(|p| {
            if record.introductory_rate {
                p.line(
                    LEFT,
                    25,
                    "This Monthly Price is an introductory rate.",
                    STYLE_NORMAL,
                )?;
                p.line(INDENT, 25, "Introductory Period", STYLE_SMALL)?;
                let period = record
                    .introductory_period_months
                    .map(|months| format!("{months} months"))
                    .unwrap_or_default();
                p.value(&period, STYLE_SMALL_BOLD_END)?;
                p.line(INDENT, 25, "Price after introductory period", STYLE_SMALL)?;
                p.value(&format!("${}", record.data_service_price), STYLE_SMALL_BOLD_END)?;
                match &record.contract {
                    Some(contract) => {
                        let lead = format!(
                            "This Monthly Price requires {} {} month ",
                            contract_article(contract.months),
                            contract.months
                        );
                        let y = p.cursor.advance(25);
                        p.canvas
                            .link_text(LEFT, y, STYLE_NORMAL, &lead, &contract.url, "contract")?;
                    }
                    None => {
                        p.line(
                            LEFT,
                            25,
                            "This Monthly Price does not require a contract.",
                            STYLE_NORMAL,
                        )?;
                    }
                }
            } else {
                p.line(
                    LEFT,
                    25,
                    "This Monthly Price is not an introductory rate.",
                    STYLE_NORMAL,
                )?;
                p.line(
                    LEFT,
                    25,
                    "This Monthly Price does not require a contract.",
                    STYLE_NORMAL,
                )?;
            }
            p.separator(10, 1)
        })
    }

    fn fee_lines(&mut self, charges: &[AdditionalCharge], none_text: &str) -> Result<()> {
        if charges.is_empty() {
            self.line(FEE_INDENT, 25, none_text, STYLE_NORMAL)?;
            return Ok(());
        }
        for charge in charges {
            self.line(FEE_INDENT, 25, &charge.name, STYLE_SMALL)?;
            self.value(&format!("${}", charge.value), STYLE_SMALL_BOLD_END)?;
        }
        Ok(())
    }

    fn additional_charges(&mut self) -> Result<()> {
        let record = self.record;
        self.section(|p| {
            p.line(LEFT, 25, "Additional Charges & Terms", STYLE_HEADING)?;
            p.line(LEFT, 35, "Provider Monthly Fees", STYLE_NORMAL)?;
            p.fee_lines(&record.monthly_charges, "No additional monthly fees")?;
            p.line(LEFT, 35, "One-time Fees at the Time of Purchase", STYLE_NORMAL)?;
            p.fee_lines(
                &record.one_time_charges,
                "No additional one-time fees at time of purchase",
            )?;
            p.line(LEFT, 35, "Early Termination Fee", STYLE_NORMAL)?;
            let termination = record
                .early_termination_fee
                .as_ref()
                .map_or_else(|| "None".to_string(), |fee| format!("${fee}"));
            p.value(&termination, STYLE_NORMAL_HEAVY_END)?;
            p.line(LEFT, 35, "Government Taxes", STYLE_NORMAL)?;
            p.value("Varies by Location", STYLE_NORMAL_HEAVY_END)?;
            p.separator(10, 3)
        })
    }

    fn discounts_and_bundles(&mut self) -> Result<()> {
        let url = self.record.discounts_and_bundles_url.clone();
        self.section(|p| {
            p.line(LEFT, 25, "Discounts & Bundles", STYLE_HEADING)?;
            let y = p.cursor.advance(25);
            p.canvas
                .link_text(INDENT, y, STYLE_NORMAL, "", &url, "Click Here")?;
            p.canvas.text(
                130,
                y,
                " for available billing discounts and pricing options",
                STYLE_NORMAL,
            )?;
            for text in [
                "for broadband service bundled with other services like video,",
                "phone, and wireless service, and use of your own equipment",
                "like modems and routers.",
            ] {
                p.line(INDENT, 25, text, STYLE_NORMAL)?;
            }
            p.separator(10, 3)
        })
    }

    fn acp(&mut self) -> Result<()> {
        let participates = if self.record.acp { "Yes" } else { "No" };
        self.section(|p| {
            p.line(
                LEFT,
                25,
                "Affordable Connectivity Program (ACP)",
                STYLE_HEADING,
            )?;
            p.line(
                INDENT,
                25,
                "The ACP is a government program to help lower the monthly",
                STYLE_NORMAL,
            )?;
            p.line(
                INDENT,
                25,
                "cost of internet service. To learn more about the ACP, including",
                STYLE_NORMAL,
            )?;
            let y = p.line(
                INDENT,
                25,
                "to find out whether you qualify, visit:",
                STYLE_NORMAL,
            )?;
            p.canvas
                .link_text(340, y, STYLE_NORMAL, "", ACP_URL, "affordableconnectivity.gov")?;
            p.line(FEE_INDENT, 25, "Participates in the ACP", STYLE_NORMAL_BOLD)?;
            p.value(participates, STYLE_NORMAL_HEAVY_END)?;
            p.separator(10, 3)
        })
    }

    fn speeds(&mut self) -> Result<()> {
        let record = self.record;
        self.section(|p| {
            p.line(LEFT, 25, "Plan Speeds", STYLE_HEADING)?;
            p.line(INDENT, 25, "Typical Download Speed", STYLE_NORMAL)?;
            p.value(
                &format!("{} Mbps", record.download_speed),
                STYLE_NORMAL_HEAVY_END,
            )?;
            p.line(INDENT, 25, "Typical Upload Speed", STYLE_NORMAL)?;
            p.value(
                &format!("{} Mbps", record.upload_speed),
                STYLE_NORMAL_HEAVY_END,
            )?;
            p.line(INDENT, 25, "Typical Latency", STYLE_NORMAL)?;
            p.value(&format!("{} ms", record.latency_ms), STYLE_NORMAL_HEAVY_END)?;
            p.separator(10, 3)
        })
    }

    fn data_allowance(&mut self) -> Result<()> {
        let record = self.record;
        let (included, overage) = match &record.data_included_gb {
            Some(gb) => (
                format!("{gb} GB"),
                format!("${}/{}GB", record.overage_fee, record.overage_data_amount),
            ),
            None => ("Unlimited".to_string(), "None".to_string()),
        };
        self.section(|p| {
            p.line(LEFT, 25, "Data Included with Monthly Price", STYLE_HEADING)?;
            p.value(&included, STYLE_NORMAL_BOLD_END)?;
            p.line(INDENT, 25, "Charges for Additional Data Usage", STYLE_NORMAL)?;
            p.value(&overage, STYLE_NORMAL_HEAVY_END)?;
            p.separator(10, 3)
        })
    }

    fn policies(&mut self) -> Result<()> {
        let record = self.record;
        self.section(|p| {
            for (heading, url) in [
                ("Network Management", record.network_management_url.as_str()),
                ("Privacy", record.privacy_policy_url.as_str()),
            ] {
                let y = p.line(LEFT, 25, heading, STYLE_HEADING)?;
                p.canvas
                    .link_text(RIGHT, y, STYLE_NORMAL_BOLD_END, "", url, "Read our Policy")?;
            }
            p.separator(15, 12)
        })
    }

    fn customer_support(&mut self) -> Result<()> {
        let record = self.record;
        self.section(|p| {
            p.line(LEFT, 25, "Customer Support", STYLE_HEADING)?;
            let y = p.line(INDENT, 25, "Contact Us:", STYLE_NORMAL)?;
            p.canvas.link_text(
                LABEL_WIDTH - 390,
                y,
                STYLE_NORMAL,
                "",
                &record.customer_support_url,
                "Contact Us",
            )?;
            p.canvas.text(
                LABEL_WIDTH - 240,
                y,
                &format!("/ {}", record.customer_support_phone),
                STYLE_NORMAL,
            )?;
            p.separator(15, 6)
        })
    }

    fn fcc_footer(&mut self) -> Result<()> {
        self.section(|p| {
            for text in [
                "Learn more about the terms used on this label by visiting the",
                "Federal Communications Commission's Consumer Resource",
                "Center.",
            ] {
                p.line(LEFT, 25, text, STYLE_NORMAL)?;
            }
            let y = p.cursor.advance(25);
            p.canvas.link_text(
                RIGHT,
                y,
                STYLE_FCC_LINK,
                "",
                FCC_CONSUMER_URL,
                "fcc.gov/consumer",
            )
        })
    }

    fn plan_identifier(&mut self) -> Result<()> {
        let record = self.record;
        let identifier =
            unique_plan_identifier(record.service_type, &record.fcc_id, &record.data_service_id);
        self.section(|p| {
            p.line(LEFT, 25, &identifier, STYLE_PLAN_ID)?;
            // Bottom padding.
            p.cursor.advance(15);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bbfacts_model::{ContractTerms, Mbps, ServiceType};

    fn record() -> LabelRecord {
        LabelRecord {
            row: 2,
            company_name: "Acme Broadband".to_string(),
            plan_name: "Gigabit Home".to_string(),
            service_type: ServiceType::Fixed,
            fcc_id: "F0001".to_string(),
            data_service_id: "42".to_string(),
            monthly_price: "599.88".to_string(),
            data_service_price: "49.99".to_string(),
            introductory_rate: false,
            introductory_period_months: None,
            contract: None,
            early_termination_fee: None,
            download_speed: Mbps::new(1000.0),
            upload_speed: Mbps::new(1.5),
            latency_ms: "20".to_string(),
            data_included_gb: None,
            overage_fee: String::new(),
            overage_data_amount: String::new(),
            acp: true,
            discounts_and_bundles_url: "https://acme.test/discounts".to_string(),
            network_management_url: "https://acme.test/network".to_string(),
            privacy_policy_url: "https://acme.test/privacy".to_string(),
            customer_support_url: "https://acme.test/support".to_string(),
            customer_support_phone: "555-0100".to_string(),
            monthly_charges: Vec::new(),
            one_time_charges: Vec::new(),
        }
    }

    fn render(record: &LabelRecord) -> (String, u32) {
        let label = render_label(record, &LabelOptions::default()).unwrap();
        (String::from_utf8(label.svg).unwrap(), label.height)
    }

    #[test]
    fn declared_height_matches_cursor() {
        let (svg, height) = render(&record());
        assert_eq!(height, 1210);
        assert!(svg.contains(r#"height="1210""#));
        assert!(svg.contains(r#"viewBox="0 0 605 1210""#));
        assert!(svg.contains(r#"height="1200""#));
        assert!(!svg.contains(HEIGHT_PLACEHOLDER));
        assert!(!svg.contains(BORDER_HEIGHT_PLACEHOLDER));
    }

    #[test]
    fn fees_grow_the_label() {
        let mut with_fees = record();
        with_fees.monthly_charges = vec![
            AdditionalCharge {
                name: "Modem".to_string(),
                value: "10.00".to_string(),
            },
            AdditionalCharge {
                name: "Router".to_string(),
                value: "5".to_string(),
            },
        ];
        let (svg, height) = render(&with_fees);
        assert_eq!(height, 1235);
        assert!(svg.contains("$10.00"));
        assert!(!svg.contains("No additional monthly fees"));
        assert!(svg.contains("No additional one-time fees at time of purchase"));
    }

    #[test]
    fn introductory_details_add_two_lines() {
        let mut intro = record();
        intro.introductory_rate = true;
        intro.introductory_period_months = Some(6);
        intro.contract = Some(ContractTerms {
            months: 11,
            url: "https://acme.test/contract".to_string(),
        });
        let (svg, height) = render(&intro);
        assert_eq!(height, 1260);
        assert!(svg.contains("This Monthly Price is an introductory rate."));
        assert!(svg.contains("6 months"));
        assert!(svg.contains("$49.99"));
        assert!(svg.contains("This Monthly Price requires an 11 month "));
        assert!(svg.contains(r#"xlink:href="https://acme.test/contract""#));
    }

    #[test]
    fn introductory_rate_without_contract() {
        let mut intro = record();
        intro.introductory_rate = true;
        intro.introductory_period_months = Some(3);
        let (svg, height) = render(&intro);
        assert_eq!(height, 1260);
        assert!(svg.contains("This Monthly Price does not require a contract."));
    }

    #[test]
    fn values_and_identifier_are_drawn() {
        let (svg, _) = render(&record());
        assert!(svg.contains("$599.88"));
        assert!(svg.contains("1000 Mbps"));
        assert!(svg.contains("1.5 Mbps"));
        assert!(svg.contains("20 ms"));
        assert!(svg.contains("Unlimited"));
        assert!(svg.contains(">Yes<"));
        assert!(svg.contains("Fixed Broadband Consumer Disclosure"));
        assert!(svg.contains("FF0001000000000000042"));
    }

    #[test]
    fn data_cap_shows_overage() {
        let mut capped = record();
        capped.data_included_gb = Some("1024".to_string());
        capped.overage_fee = "10".to_string();
        capped.overage_data_amount = "50".to_string();
        capped.early_termination_fee = Some("150".to_string());
        let (svg, _) = render(&capped);
        assert!(svg.contains("1024 GB"));
        assert!(svg.contains("$10/50GB"));
        assert!(svg.contains("$150"));
    }

    #[test]
    fn placeholder_text_in_data_is_left_alone() {
        let mut odd = record();
        odd.company_name = HEIGHT_PLACEHOLDER.to_string();
        let (svg, _) = render(&odd);
        assert!(svg.contains(&format!(">{HEIGHT_PLACEHOLDER}<")));
    }

    #[test]
    fn custom_title() {
        let label = render_label(&record(), &LabelOptions::new().with_title("Facts")).unwrap();
        let svg = String::from_utf8(label.svg).unwrap();
        assert!(svg.contains(">Facts<"));
    }
}
