use byteorder::{BigEndian, ByteOrder};
use proptest::prelude::*;
use seisio::codec::{from_native, ibm_to_ieee, ieee_to_ibm, to_native};
use seisio::{Format, Mode};

proptest! {
    // IBM has a 24-bit mantissa with hexadecimal normalisation, so a round
    // trip through it may shed up to three low bits.
    #[test]
    fn ibm_float_roundtrip_is_close(x in -1.0e6f32..1.0e6f32) {
        let back = ibm_to_ieee(ieee_to_ibm(x));
        prop_assert!(
            (f64::from(back) - f64::from(x)).abs() <= f64::from(x.abs()) * 1e-6 + 1e-6,
            "{x} -> {back}"
        );
    }

    #[test]
    fn ibm_encoding_preserves_sign(x in -1.0e6f32..1.0e6f32) {
        let back = ibm_to_ieee(ieee_to_ibm(x));
        prop_assert!(back == 0.0 || (back < 0.0) == (x < 0.0));
    }

    #[test]
    fn int4_native_conversion_roundtrips(vals in proptest::collection::vec(any::<i32>(), 1..64)) {
        let mut buf = vec![0u8; vals.len() * 4];
        for (chunk, v) in buf.chunks_exact_mut(4).zip(&vals) {
            BigEndian::write_i32(chunk, *v);
        }
        let original = buf.clone();

        to_native(Format::Int4, vals.len(), &mut buf);
        from_native(Format::Int4, vals.len(), &mut buf);
        prop_assert_eq!(buf, original);
    }

    #[test]
    fn int2_native_conversion_roundtrips(vals in proptest::collection::vec(any::<i16>(), 1..64)) {
        let mut buf = vec![0u8; vals.len() * 2];
        for (chunk, v) in buf.chunks_exact_mut(2).zip(&vals) {
            BigEndian::write_i16(chunk, *v);
        }
        let original = buf.clone();

        to_native(Format::Int2, vals.len(), &mut buf);
        from_native(Format::Int2, vals.len(), &mut buf);
        prop_assert_eq!(buf, original);
    }

    #[test]
    fn mode_parsing_never_panics(s in ".*") {
        let _ = s.parse::<Mode>();
    }
}
