//! Static wire shape descriptions and the runtime walker over them.

use tracing::trace;

use super::{Cursor, ScalarKind, Value};
use crate::protocol::constants::{EVENT_CODE_LENGTH, EVENT_DATA_LENGTH};
use crate::protocol::event::EventCode;
use crate::text;
use crate::DecodeError;

/// Shape of one field on the wire.
///
/// The tree mirrors the typed records exactly; [`Layout::decode`] walks it to
/// produce a [`Value`] without going through the concrete Rust type.
#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    /// A single primitive.
    Scalar(ScalarKind),
    /// Fixed-size character buffer, null padded.
    Text { len: usize },
    /// `len` consecutive elements of the same shape.
    Sequence { len: usize, element: Box<Layout> },
    /// Named fields in wire order.
    Record { name: &'static str, fields: Vec<(&'static str, Layout)> },
    /// Four byte event code followed by the payload region it selects.
    EventUnion,
}

impl Layout {
    /// Bytes this shape occupies on the wire.
    pub fn wire_size(&self) -> usize {
        match self {
            Layout::Scalar(kind) => kind.size(),
            Layout::Text { len } => *len,
            Layout::Sequence { len, element } => len * element.wire_size(),
            Layout::Record { fields, .. } => fields.iter().map(|(_, field)| field.wire_size()).sum(),
            Layout::EventUnion => EVENT_CODE_LENGTH + EVENT_DATA_LENGTH,
        }
    }

    /// Decode one value of this shape, advancing the cursor by [`Self::wire_size`].
    pub fn decode(&self, cursor: &mut Cursor<'_>) -> Result<Value, DecodeError> {
        match self {
            Layout::Scalar(kind) => kind.decode(cursor),
            Layout::Text { len } => {
                let bytes = cursor.take(*len)?;
                Ok(text::text_value(bytes))
            }
            Layout::Sequence { len, element } => {
                let items = (0..*len).map(|_| element.decode(cursor)).collect::<Result<_, _>>()?;
                Ok(Value::Sequence(items))
            }
            Layout::Record { fields, .. } => {
                let mut values = Vec::with_capacity(fields.len());
                for (name, field) in fields {
                    values.push((*name, field.decode(cursor)?));
                }
                Ok(Value::Record(values))
            }
            Layout::EventUnion => decode_event_union(cursor),
        }
    }
}

fn decode_event_union(cursor: &mut Cursor<'_>) -> Result<Value, DecodeError> {
    let raw: [u8; EVENT_CODE_LENGTH] = cursor.read_array()?;
    let code = EventCode::from_bytes(raw).ok_or(DecodeError::UnknownEventCode { code: raw })?;
    cursor.ensure(EVENT_DATA_LENGTH)?;
    trace!("event union {} at offset {}", code, cursor.offset());

    let mut fields = vec![("code", Value::Text(code.as_str().to_string()))];
    let mut consumed = 0;
    if let Some(Layout::Record { fields: payload, .. }) = code.payload_layout() {
        for (name, field) in &payload {
            consumed += field.wire_size();
            fields.push((*name, field.decode(cursor)?));
        }
    }
    cursor.skip(EVENT_DATA_LENGTH - consumed)?;
    Ok(Value::Record(fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_size_multiplies_element_size() {
        let layout = Layout::Sequence { len: 22, element: Box::new(Layout::Scalar(ScalarKind::F32)) };
        assert_eq!(layout.wire_size(), 88);
    }

    #[test]
    fn text_layout_stops_at_first_null() -> Result<(), DecodeError> {
        let mut data = b"Driver\0".to_vec();
        data.resize(48, b' ');
        let value = Layout::Text { len: 48 }.decode(&mut Cursor::new(&data))?;
        assert_eq!(value, Value::Text("Driver".to_string()));
        Ok(())
    }

    #[test]
    fn invalid_text_is_kept_as_raw_bytes() -> Result<(), DecodeError> {
        let mut data = vec![b'D', 0xC3, 0x28, b'r', 0];
        data.resize(48, b' ');
        let value = Layout::Text { len: 48 }.decode(&mut Cursor::new(&data))?;

        assert_eq!(value, Value::InvalidText(vec![b'D', 0xC3, 0x28, b'r']));
        assert!(matches!(value.as_text(), Some(Err(DecodeError::InvalidText { .. }))));
        assert!(value.has_invalid_text());
        Ok(())
    }

    #[test]
    fn event_union_always_consumes_the_full_region() -> Result<(), DecodeError> {
        let mut data = b"STLG".to_vec();
        data.push(4);
        data.resize(16, 0);
        let mut cursor = Cursor::new(&data);
        let value = Layout::EventUnion.decode(&mut cursor)?;

        assert_eq!(cursor.offset(), 16);
        assert_eq!(value.get("code"), Some(&Value::Text("STLG".to_string())));
        assert_eq!(value.get("num_lights"), Some(&Value::U8(4)));
        Ok(())
    }

    #[test]
    fn event_union_rejects_unknown_codes() {
        let mut data = b"ABCD".to_vec();
        data.resize(16, 0);
        assert_eq!(
            Layout::EventUnion.decode(&mut Cursor::new(&data)),
            Err(DecodeError::UnknownEventCode { code: *b"ABCD" })
        );
    }

    #[test]
    fn event_union_requires_padding_even_without_payload() {
        let data = b"SSTA".to_vec();
        assert!(matches!(
            Layout::EventUnion.decode(&mut Cursor::new(&data)),
            Err(DecodeError::Truncated { offset: 4, needed: 12, remaining: 0 })
        ));
    }
}
