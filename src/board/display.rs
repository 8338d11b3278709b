//! ST7789 panel, 320×170 over SPI with DMA.

use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::{
    Async,
    delay::Delay,
    dma::{
        DmaRxBuf,
        DmaTxBuf,
    },
    dma_buffers,
    gpio::{
        Level,
        Output,
        OutputConfig,
    },
    spi::master::{
        Spi,
        SpiDmaBus,
    },
    time::Rate,
};
use mipidsi::{
    Builder,
    models::ST7789,
    options::{
        ColorInversion,
        Orientation,
        Rotation,
    },
};

use super::DisplayResources;
use crate::{
    config::SCREEN_SIZE,
    surface::DrawSurface,
};

/// Bytes buffered between the graphics driver and the SPI bus.
const TRANSFER_BUFFER: usize = 32_000;

type SpiInterface<'a> =
    mipidsi::interface::SpiInterface<'a, ExclusiveDevice<SpiDmaBus<'a, Async>, Output<'a>, Delay>, Output<'a>>;

pub type Display<'a> = mipidsi::Display<SpiInterface<'a>, ST7789, Output<'a>>;

/// The panel as a renderer canvas.
pub type Surface<'a> = DrawSurface<Display<'a>>;

impl<'a> From<DisplayResources<'a>> for Display<'a> {
    fn from(res: DisplayResources<'a>) -> Self {
        let (rx_buffer, rx_descriptors, tx_buffer, tx_descriptors) = dma_buffers!(TRANSFER_BUFFER);
        let dma_rx_buf = DmaRxBuf::new(rx_descriptors, rx_buffer).expect("DMA rx buffer");
        let dma_tx_buf = DmaTxBuf::new(tx_descriptors, tx_buffer).expect("DMA tx buffer");

        let mut delay = Delay::new();

        let dc = Output::new(res.dc, Level::Low, OutputConfig::default());
        let mut rst = Output::new(res.rst, Level::Low, OutputConfig::default());
        rst.set_high();

        let spi = Spi::new(
            res.spi,
            esp_hal::spi::master::Config::default().with_frequency(Rate::from_mhz(80)),
        )
        .expect("SPI2 configuration")
        .with_sck(res.sck)
        .with_mosi(res.mosi)
        .with_miso(res.miso)
        .with_dma(res.dma)
        .with_buffers(dma_rx_buf, dma_tx_buf)
        .into_async();

        let cs = Output::new(res.cs, Level::High, OutputConfig::default());
        let spi_device = ExclusiveDevice::new(spi, cs, delay).expect("display chip select");

        let buffer = crate::mk_static!([u8; TRANSFER_BUFFER], [0_u8; TRANSFER_BUFFER]);
        let di = mipidsi::interface::SpiInterface::new(spi_device, dc, buffer);

        // The panel is mounted portrait; the controller rotates it to landscape.
        Builder::new(ST7789, di)
            .reset_pin(rst)
            .display_size(SCREEN_SIZE.height as u16, SCREEN_SIZE.width as u16)
            .invert_colors(ColorInversion::Inverted)
            .orientation(Orientation::new().rotate(Rotation::Deg90))
            .display_offset(35, 0)
            .init(&mut delay)
            .expect("ST7789 init")
    }
}

impl<'a> From<DisplayResources<'a>> for Surface<'a> {
    fn from(res: DisplayResources<'a>) -> Self {
        DrawSurface::new(Display::from(res))
    }
}
