//! Shared constants and helpers for label rendering.

use bbfacts_model::ServiceType;

/// Label width in SVG user units.
pub const LABEL_WIDTH: u32 = 605;

/// Left margin for headings and separators.
pub const LEFT: u32 = 25;

/// Indent for body lines under a heading.
pub const INDENT: u32 = 40;

/// Indent for individual fee lines.
pub const FEE_INDENT: u32 = 55;

/// Right edge used by end-anchored values and separators.
pub const RIGHT: u32 = LABEL_WIDTH - 25;

/// Inset of the border rectangle on each side.
pub const BORDER_INSET: u32 = 5;

/// Width of the zero-padded data service id in the unique plan identifier.
pub const SERVICE_ID_WIDTH: usize = 15;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Replaced by the final label height once layout is complete.
pub const HEIGHT_PLACEHOLDER: &str = "__LABEL_HEIGHT__";

/// Replaced by the border rectangle height once layout is complete.
pub const BORDER_HEIGHT_PLACEHOLDER: &str = "__BORDER_HEIGHT__";

pub const FCC_CONSUMER_URL: &str = "https://fcc.gov/consumer";
pub const ACP_URL: &str = "https://affordableconnectivity.gov/";

pub const STYLE_TITLE: &str =
    "font-size:48pt;font-weight:945;font-family:'Roboto Flex';text-anchor:middle";
pub const STYLE_COMPANY: &str =
    "font-size:18pt;font-weight:bold;font-family:'Roboto';text-anchor:left";
pub const STYLE_PLAN: &str =
    "font-size:14pt;font-weight:800;font-family:'Roboto Flex';text-anchor:left";
pub const STYLE_NORMAL: &str = "font-size:14pt;font-family:Roboto;text-anchor:left";
pub const STYLE_NORMAL_BOLD: &str =
    "font-size:14pt;font-weight:900;font-family:Roboto;text-anchor:left";
pub const STYLE_NORMAL_BOLD_END: &str =
    "font-size:14pt;font-weight:bold;font-family:'Roboto Flex';text-anchor:end";
pub const STYLE_NORMAL_HEAVY_END: &str =
    "font-size:14pt;font-weight:900;font-family:Roboto;text-anchor:end";
pub const STYLE_SMALL: &str = "font-size:12pt;font-family:Roboto;text-anchor:left";
pub const STYLE_SMALL_BOLD_END: &str =
    "font-size:12pt;font-weight:900;font-family:Roboto;text-anchor:end";
pub const STYLE_PRICE: &str =
    "font-size:18pt;font-weight:800;font-family:'Roboto Flex';text-anchor:left";
pub const STYLE_PRICE_VALUE: &str =
    "font-size:18pt;font-weight:800;font-family:'Roboto Flex';text-anchor:end";
pub const STYLE_HEADING: &str =
    "font-size:14pt;font-weight:bold;font-family:'Roboto Flex';text-anchor:left";
pub const STYLE_FCC_LINK: &str = "font-size:14pt;font-family:'Roboto Flex';text-anchor:end";
pub const STYLE_PLAN_ID: &str = "font-size:12pt;font-family:Roboto;text-anchor:left";
pub const STYLE_LINK_SPAN: &str = "fill:blue";

/// Stylesheet embedded in every label: web fonts and link colours.
pub const STYLESHEET: &str = "
@import url('https://fonts.googleapis.com/css2?family=Roboto:wght@400;500;700;900');
@import url('https://fonts.googleapis.com/css2?family=Roboto+Flex:opsz,wght@8..144,400;8..144,500;8..144,600;8..144,700;8..144,800;8..144,900;8..144,1000');
a:link, a:hover, a:active, a:visited { fill: #0000EE; }
a:hover { text-decoration: underline; }
";

/// `F`/`M`, the registrant id, then the data service id zero-padded to 15.
pub fn unique_plan_identifier(
    service_type: ServiceType,
    fcc_id: &str,
    data_service_id: &str,
) -> String {
    format!(
        "{}{}{:0>width$}",
        service_type.code(),
        fcc_id,
        data_service_id,
        width = SERVICE_ID_WIDTH
    )
}

/// Article for a contract length in months ("an 8 month", "a 12 month").
pub fn contract_article(months: u32) -> &'static str {
    match months {
        8 | 11 | 18 => "an",
        _ => "a",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_identifier_pads_service_id() {
        insta::assert_snapshot!(
            unique_plan_identifier(ServiceType::Fixed, "F0001", "42"),
            @"FF0001000000000000042"
        );
        assert_eq!(
            unique_plan_identifier(ServiceType::Mobile, "X9", "123456789012345"),
            "MX9123456789012345"
        );
    }

    #[test]
    fn plan_identifier_keeps_long_ids() {
        assert_eq!(
            unique_plan_identifier(ServiceType::Fixed, "", "1234567890123456"),
            "F1234567890123456"
        );
    }

    #[test]
    fn contract_articles() {
        assert_eq!(contract_article(8), "an");
        assert_eq!(contract_article(11), "an");
        assert_eq!(contract_article(18), "an");
        assert_eq!(contract_article(12), "a");
        assert_eq!(contract_article(24), "a");
    }
}
