//! Line parsers for the sections that only exist in `usb.ids`

use winnow::ModalResult;
use winnow::Parser;
use winnow::combinator::trace;
use winnow::error::ContextError;
use winnow::error::ErrMode;
use winnow::error::StrContext;

use crate::parser::gap;
use crate::parser::hex1;
use crate::parser::hex2;
use crate::parser::hex3;
use crate::parser::hex4;
use crate::parser::name;

/// `<tag><id>  <name>`
fn tagged<'i, O>(
    tag: &'static str,
    id: impl Parser<&'i str, O, ErrMode<ContextError>>,
    label: &'static str,
) -> impl Parser<&'i str, (O, &'i str), ErrMode<ContextError>> {
    (tag, id.context(StrContext::Label(label)), gap, name).map(|(_, id, (), name)| (id, name))
}

pub(super) fn audio_terminal_line<'i>(i: &mut &'i str) -> ModalResult<(u16, &'i str)> {
    trace("audio_terminal", tagged("AT ", hex4, "audio terminal ID")).parse_next(i)
}

pub(super) fn hid_line<'i>(i: &mut &'i str) -> ModalResult<(u8, &'i str)> {
    trace("hid", tagged("HID ", hex2, "HID descriptor type")).parse_next(i)
}

pub(super) fn hid_item_line<'i>(i: &mut &'i str) -> ModalResult<(u8, &'i str)> {
    trace("hid_item", tagged("R ", hex2, "HID item type")).parse_next(i)
}

pub(super) fn physical_bias_line<'i>(i: &mut &'i str) -> ModalResult<(u8, &'i str)> {
    trace("physical_bias", tagged("BIAS ", hex1, "physical bias")).parse_next(i)
}

pub(super) fn physical_descriptor_line<'i>(i: &mut &'i str) -> ModalResult<(u8, &'i str)> {
    trace(
        "physical_descriptor",
        tagged("PHY ", hex2, "physical descriptor item"),
    )
    .parse_next(i)
}

pub(super) fn hid_usage_page_line<'i>(i: &mut &'i str) -> ModalResult<(u8, &'i str)> {
    trace("hid_usage_page", tagged("HUT ", hex2, "HID usage page")).parse_next(i)
}

pub(super) fn hid_usage_line<'i>(i: &mut &'i str) -> ModalResult<(u16, &'i str)> {
    trace("hid_usage", tagged("\t", hex3, "HID usage")).parse_next(i)
}

pub(super) fn language_line<'i>(i: &mut &'i str) -> ModalResult<(u16, &'i str)> {
    trace("language", tagged("L ", hex4, "language ID")).parse_next(i)
}

pub(super) fn dialect_line<'i>(i: &mut &'i str) -> ModalResult<(u8, &'i str)> {
    trace("dialect", tagged("\t", hex2, "dialect ID")).parse_next(i)
}

pub(super) fn country_code_line<'i>(i: &mut &'i str) -> ModalResult<(u8, &'i str)> {
    trace("country_code", tagged("HCC ", hex2, "country code")).parse_next(i)
}

pub(super) fn video_terminal_line<'i>(i: &mut &'i str) -> ModalResult<(u16, &'i str)> {
    trace("video_terminal", tagged("VT ", hex4, "video terminal ID")).parse_next(i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_column_layouts() {
        let (_, out) = audio_terminal_line
            .parse_peek("AT 0201  Microphone")
            .unwrap();
        assert_eq!(out, (0x0201, "Microphone"));

        let (_, out) = hid_line.parse_peek("HID 22  Report").unwrap();
        assert_eq!(out, (0x22, "Report"));

        let (_, out) = hid_item_line.parse_peek("R 08  Usage").unwrap();
        assert_eq!(out, (0x08, "Usage"));

        let (_, out) = physical_bias_line
            .parse_peek("BIAS 1  Right Hand")
            .unwrap();
        assert_eq!(out, (0x1, "Right Hand"));

        let (_, out) = physical_descriptor_line
            .parse_peek("PHY 01  Hand")
            .unwrap();
        assert_eq!(out, (0x01, "Hand"));

        let (_, out) = hid_usage_page_line
            .parse_peek("HUT 01  Generic Desktop Controls")
            .unwrap();
        assert_eq!(out, (0x01, "Generic Desktop Controls"));

        let (_, out) = hid_usage_line.parse_peek("\t030  Direction-X").unwrap();
        assert_eq!(out, (0x030, "Direction-X"));

        let (_, out) = language_line.parse_peek("L 0009  English").unwrap();
        assert_eq!(out, (0x0009, "English"));

        let (_, out) = dialect_line.parse_peek("\t01  US").unwrap();
        assert_eq!(out, (0x01, "US"));

        let (_, out) = country_code_line.parse_peek("HCC 09  French").unwrap();
        assert_eq!(out, (0x09, "French"));

        let (_, out) = video_terminal_line
            .parse_peek("VT 0401  Composite connector")
            .unwrap();
        assert_eq!(out, (0x0401, "Composite connector"));
    }

    #[test]
    fn test_rejects_bad_ids() {
        assert!(hid_line.parse_peek("HID 2x  Broken").is_err());
        assert!(language_line.parse_peek("L 09  Short").is_err());
        assert!(physical_bias_line.parse_peek("BIAS g  Nope").is_err());
    }
}
