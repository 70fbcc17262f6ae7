use argh::FromArgs;

use hybrid::image::{ops, Image, ImageSize};
use hybrid::imgproc::filter::{self, kernels::Kernel, BandFilter};
use hybrid::imgproc::hybrid::{create_hybrid_from_config, Band, HybridConfig};
use hybrid::imgproc::parallel::ExecutionStrategy;

#[derive(FromArgs)]
/// Blend a smooth gradient with a fine checkerboard into a hybrid image
struct Args {
    /// width of the synthetic images
    #[argh(option, default = "256")]
    width: usize,

    /// height of the synthetic images
    #[argh(option, default = "256")]
    height: usize,

    /// sigma of the filter applied to the gradient
    #[argh(option, default = "7.0")]
    sigma1: f32,

    /// kernel size of the filter applied to the gradient
    #[argh(option, default = "29")]
    size1: usize,

    /// band kept from the gradient (low or high)
    #[argh(option, default = "Band::Low")]
    band1: Band,

    /// sigma of the filter applied to the checkerboard
    #[argh(option, default = "3.0")]
    sigma2: f32,

    /// kernel size of the filter applied to the checkerboard
    #[argh(option, default = "13")]
    size2: usize,

    /// band kept from the checkerboard (low or high)
    #[argh(option, default = "Band::High")]
    band2: Band,

    /// weight of the checkerboard in the blend
    #[argh(option, default = "0.5")]
    mixin_ratio: f32,

    /// gain applied before quantization
    #[argh(option, default = "1.0")]
    scale_factor: f32,

    /// execution strategy of the correlation benchmark (serial, rows, fixed:<n>)
    #[argh(option, default = "ExecutionStrategy::ParallelRows")]
    strategy: ExecutionStrategy,
}

fn gradient(size: ImageSize) -> Result<Image<u8>, Box<dyn std::error::Error>> {
    let data = (0..size.height)
        .flat_map(|r| (0..size.width).map(move |c| (r, c)))
        .flat_map(|(r, c)| {
            let v = ((r + c) * 255 / (size.width + size.height).max(1)) as u8;
            [v, v / 2, 255 - v]
        })
        .collect();
    Ok(Image::color(size, 3, data)?)
}

fn checkerboard(size: ImageSize, cell: usize) -> Result<Image<u8>, Box<dyn std::error::Error>> {
    let data = (0..size.height)
        .flat_map(|r| (0..size.width).map(move |c| (r, c)))
        .flat_map(|(r, c)| {
            let v = if (r / cell + c / cell) % 2 == 0 { 255 } else { 0 };
            [v, v, v]
        })
        .collect();
    Ok(Image::color(size, 3, data)?)
}

fn mean(image: &Image<u8>) -> f64 {
    let n = image.as_slice().len().max(1) as f64;
    image.as_slice().iter().map(|&v| v as f64).sum::<f64>() / n
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let size = ImageSize {
        width: args.width,
        height: args.height,
    };
    let far = gradient(size)?;
    let near = checkerboard(size, 4)?;

    let config = HybridConfig::default()
        .with_first(BandFilter::new(args.band1, args.sigma1, args.size1))
        .with_second(BandFilter::new(args.band2, args.sigma2, args.size2))
        .with_mixin_ratio(args.mixin_ratio)
        .with_scale_factor(args.scale_factor);

    let start = std::time::Instant::now();
    let hybrid = create_hybrid_from_config(&far, &near, &config)?;
    log::info!("hybrid image computed in {:?}", start.elapsed());

    // time the correlation engine alone with the requested strategy
    let box_kernel = Kernel::ones(args.size2, args.size2)?;
    let mut near_f32 = Image::from_shape_val(near.shape(), 0.0f32);
    ops::normalize_to_f32(&near, &mut near_f32)?;
    let start = std::time::Instant::now();
    std::hint::black_box(filter::cross_correlate_with(
        &near_f32,
        &box_kernel,
        args.strategy,
    )?);
    log::info!(
        "{}x{} correlation with {:?} in {:?}",
        args.size2,
        args.size2,
        args.strategy,
        start.elapsed()
    );

    println!("input size: {}", size);
    println!("first: {:?}", config.first);
    println!("second: {:?}", config.second);
    println!("mean gradient: {:.2}", mean(&far));
    println!("mean checkerboard: {:.2}", mean(&near));
    println!("mean hybrid: {:.2}", mean(&hybrid));

    Ok(())
}
