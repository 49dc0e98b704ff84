//! Door Timer Demo - relay countdown driven by the timer queue on STM32F401
//!
//! Three periodic tasks share a 50Hz tick:
//! - `Buttons`: debounces the user button (PC13) every tick
//! - `Status`: blinks the LED (PA5) while the countdown runs
//! - `Countdown`: counts the remaining seconds down once per second
//!
//! The main loop runs the start/pause/stop state machine between passes.
//!
//! Build with `--no-default-features --features pac,memory-x` for a
//! `thumbv7em-none-eabihf` target.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use eertos::time::period_from_ms;
use eertos::{SysTickSource, TimerQueue};
use portable_atomic::{AtomicBool, AtomicU16, AtomicU8, Ordering};

use stm32_metapac as pac;

eertos::task_ids! {
    enum Tasks { Buttons, Status, Countdown }
}

static QUEUE: TimerQueue<Tasks, 3> = TimerQueue::new();

// ============ Shared State ============

const RUN_SECONDS: u16 = 10;
const DEBOUNCE_TICKS: u8 = 4;

const IDLE: u8 = 0;
const RUN: u8 = 1;
const PAUSE: u8 = 2;

static STATE: AtomicU8 = AtomicU8::new(IDLE);
static SECONDS: AtomicU16 = AtomicU16::new(0);
static PRESSED: AtomicBool = AtomicBool::new(false);

// ============ Board ============

fn board_init() {
    pac::RCC.ahb1enr().modify(|w| {
        w.set_gpioaen(true);
        w.set_gpiocen(true);
    });
    pac::GPIOA.moder().modify(|w| w.set_moder(5, pac::gpio::vals::Moder::OUTPUT));
    pac::GPIOA.otyper().modify(|w| w.set_ot(5, pac::gpio::vals::Ot::PUSHPULL));
}

fn button_down() -> bool {
    pac::GPIOC.idr().read().idr(13) == pac::gpio::vals::Idr::LOW
}

fn led(on: bool) {
    pac::GPIOA.bsrr().write(|w| {
        if on {
            w.set_bs(5, true)
        } else {
            w.set_br(5, true)
        }
    });
}

// ============ Tasks ============

fn task_buttons() {
    static HELD: AtomicU8 = AtomicU8::new(0);

    if button_down() {
        let held = HELD.load(Ordering::Relaxed);
        if held < DEBOUNCE_TICKS {
            HELD.store(held + 1, Ordering::Relaxed);
        } else {
            PRESSED.store(true, Ordering::Relaxed);
            HELD.store(0, Ordering::Relaxed);
        }
    }
}

fn task_status() {
    static LIT: AtomicBool = AtomicBool::new(false);

    let lit = match STATE.load(Ordering::Relaxed) {
        RUN => !LIT.load(Ordering::Relaxed),
        PAUSE => true,
        _ => false,
    };
    LIT.store(lit, Ordering::Relaxed);
    led(lit);
}

fn task_countdown() {
    if STATE.load(Ordering::Relaxed) != RUN {
        return;
    }
    match SECONDS.load(Ordering::Relaxed) {
        0 => STATE.store(IDLE, Ordering::Relaxed),
        s => SECONDS.store(s - 1, Ordering::Relaxed),
    }
}

static BUTTONS: fn() = task_buttons;
static STATUS: fn() = task_status;
static COUNTDOWN: fn() = task_countdown;

// ============ Main ============

fn app_step() {
    if !PRESSED.swap(false, Ordering::Relaxed) {
        return;
    }

    let next = match STATE.load(Ordering::Relaxed) {
        IDLE => {
            SECONDS.store(RUN_SECONDS, Ordering::Relaxed);
            RUN
        }
        RUN => PAUSE,
        _ => RUN,
    };
    eertos::info!("state {} -> {}", STATE.load(Ordering::Relaxed), next);
    STATE.store(next, Ordering::Relaxed);
}

#[entry]
fn main() -> ! {
    board_init();

    QUEUE.register(Tasks::Buttons, &BUTTONS, 1).expect("Buttons task failed");
    QUEUE
        .register(Tasks::Status, &STATUS, period_from_ms(250).expect("bad period"))
        .expect("Status task failed");
    QUEUE
        .register(Tasks::Countdown, &COUNTDOWN, period_from_ms(1000).expect("bad period"))
        .expect("Countdown task failed");

    eertos::info!("Starting kernel");
    QUEUE.start(&mut SysTickSource::default()).expect("Kernel start failed");

    QUEUE.run(app_step)
}
