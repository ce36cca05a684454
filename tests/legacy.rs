#[cfg(feature = "legacy")]
#[test]
fn should_operate_on_global_context() {
    use shrink::{legacy, Algorithm, Error, Level};

    //single test, global state is shared by whole binary
    legacy::cleanup();
    assert_eq!(legacy::bounds(10), None);
    assert_eq!(legacy::algorithm_name(), None);
    assert_eq!(legacy::sized_alloc(10).unwrap_err(), Error::Uninitialized);
    assert_eq!(legacy::compress(b"data", &mut [0u8; 16], None).unwrap_err(), Error::Uninitialized);
    assert_eq!(legacy::decompress(b"data", &mut [0u8; 16], None).unwrap_err(), Error::Uninitialized);

    legacy::init(Algorithm::None, Level::None).expect("init null");
    assert_eq!(legacy::algorithm_name(), Some("null"));
    assert_eq!(legacy::bounds(10), Some(10));

    let mut dst = legacy::sized_alloc(4).expect("allocate");
    assert_eq!(legacy::compress(b"data", &mut dst, None), Ok(4));
    assert_eq!(dst, b"data");

    //failed init keeps previous context
    let error = legacy::init(Algorithm::None, Level::Max).unwrap_err();
    assert!(error.is_invalid_configuration());
    assert_eq!(legacy::algorithm_name(), Some("null"));

    #[cfg(feature = "zstd")]
    {
        legacy::init(Algorithm::Zstd, Level::Min).expect("init zstd");
        assert_eq!(legacy::algorithm_name(), Some("zstd_1"));

        let data = [b'a'; 1000];
        let mut compressed = legacy::sized_alloc(data.len()).expect("allocate");
        let len = legacy::compress(&data, &mut compressed, None).expect("compress");
        let mut decompressed = [0u8; 1000];
        assert_eq!(legacy::decompress(&compressed[..len], &mut decompressed, None), Ok(data.len()));
        assert_eq!(decompressed, data);
    }

    legacy::cleanup();
    assert_eq!(legacy::algorithm_name(), None);
}
