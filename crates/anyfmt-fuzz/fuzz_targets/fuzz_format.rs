#![no_main]
use anyfmt_core::{FormatOptions, Formatter, Value};
use libfuzzer_sys::fuzz_target;

// Input layout: [policy][arg count][9 bytes per arg: kind, 8-byte payload][template]
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let options = if data[0] & 1 == 0 {
        FormatOptions::default()
    } else {
        FormatOptions::strict()
    };
    let argc = usize::from(data[1] % 8);
    let rest = &data[2..];
    if rest.len() < argc * 9 {
        return;
    }

    let args: Vec<Value<'_>> = rest[..argc * 9]
        .chunks_exact(9)
        .map(|chunk| {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(&chunk[1..]);
            let bits = u64::from_le_bytes(raw);
            match chunk[0] % 15 {
                0 => Value::Bool(bits & 1 == 1),
                1 => Value::Char(char::from_u32(bits as u32).unwrap_or('?')),
                2 => Value::I8(bits as i8),
                3 => Value::U8(bits as u8),
                4 => Value::I16(bits as i16),
                5 => Value::U16(bits as u16),
                6 => Value::I32(bits as i32),
                7 => Value::U32(bits as u32),
                8 => Value::I64(bits as i64),
                9 => Value::U64(bits),
                10 => Value::F32(f32::from_bits(bits as u32)),
                11 => Value::F64(f64::from_bits(bits)),
                12 => Value::LongDouble(f64::from_bits(bits)),
                13 => Value::Size(bits as usize),
                _ => Value::from("fuzz"),
            }
        })
        .collect();

    let template = String::from_utf8_lossy(&rest[argc * 9..]);
    let formatter = Formatter::new(options);

    let mut out = String::from("prefix");
    if formatter.render_into(&mut out, &template, &args).is_ok() {
        // render_into only appends, and agrees with render.
        assert!(out.starts_with("prefix"));
        assert_eq!(
            formatter.render(&template, &args).ok().as_deref(),
            out.get("prefix".len()..)
        );
    }
});
